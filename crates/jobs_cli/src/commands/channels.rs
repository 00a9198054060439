use anyhow::Result;
use colored::*;
use jobs_core::WifiChannel;

pub fn execute() -> Result<()> {
    println!("{}", "Wi-Fi channels (2.4 GHz):".bold());
    for channel in WifiChannel::ALL {
        println!(
            "  {:<11} {} MHz",
            channel.name(),
            channel.frequency_mhz()
        );
    }
    Ok(())
}
