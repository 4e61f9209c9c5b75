use gsusb::{set_hardware_filter, SysfsResolver};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let netdev = args.next().unwrap_or_else(|| "can0".into());
    let definition = args.next().unwrap_or_else(|| "0x100, 0x200-0x2FF".into());

    set_hardware_filter(&SysfsResolver, &netdev, &definition)?;
    println!("filter programmed on {}", netdev);

    Ok(())
}
