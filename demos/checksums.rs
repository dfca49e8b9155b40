use lane_adler::{Adler32, checksum, config};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data = b"The quick brown fox jumps over the lazy dog";

    println!("Adler-32: {:08X}", checksum(data));
    println!("Kernel:   {}", config::get().effective);

    let data_part1 = b"The quick ";
    let data_part2 = b"brown fox jumps over the lazy dog";

    let running = Adler32::new().update(data_part1);
    println!("Running Adler-32 (partial): {:08X}", running.finish());

    // Hand the accumulators to a later call, as if the rest arrived later.
    let (s1, s2) = running.into_parts();
    match Adler32::from_parts(s1, s2) {
        Ok(resumed) => println!("Resumed Adler-32: {:08X}", resumed.update(data_part2).finish()),
        Err(err) => eprintln!("cannot resume: {}", err),
    }
}
