use rand::Rng;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use storage_gauge::{Color, DialStyle, Gauge, GaugeCommand, GaugeConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("storage_gauge=debug").init();

    // A fuel gauge on the guide-line dial, built with the bon-generated builder
    let config = GaugeConfig::builder()
        .style(DialStyle::Guides)
        .max_indicator_value(60)
        .indicator_value(45)
        .big_text_suffix("L")
        .small_text("Fuel")
        .foreground_indicator_color(Color::from_argb(0xccf2_a33a))
        .title("Fuel")
        .build();

    let mut gauge = Gauge::new(config)?;

    // Create a channel for sending random commands
    let (sender, receiver) = mpsc::channel();

    // Burn fuel steadily, refill when empty, and now and then send a reading
    // outside the scale
    thread::spawn(move || {
        let mut rng = rand::rng();
        let mut level = 45;
        loop {
            let command = if level <= 0 {
                level = 60;
                GaugeCommand::SetValue(level)
            } else if rng.random_range(0..10) == 0 {
                level = rng.random_range(-20..90);
                GaugeCommand::SetValue(level)
            } else {
                let burn = rng.random_range(1..6);
                level -= burn;
                GaugeCommand::Step(-burn)
            };

            if sender.send(command).is_err() {
                break;
            }

            thread::sleep(Duration::from_millis(700));
        }
    });

    println!("Displaying a fuel gauge driven by a command stream:");
    println!("- Steps down as fuel burns, refills at empty");
    println!("- Occasional out-of-range readings are clamped");
    println!("- Type a number and press Enter, or use the arrow keys");
    println!("Press Ctrl+C to exit");

    gauge.show_with_commands(receiver)?;
    Ok(())
}
