pub mod market;
pub mod matching;
pub mod sample;
pub mod sim;
pub mod trade;

mod error;
pub use error::Error;

/// dimensional analysis types
pub type Count = f64;
pub type Probability = f64;
pub type Percent = f64;
pub type Utility = f64;
pub type Seed = u64;

// monte carlo parameters
pub const DEFAULT_TRIALS: usize = 1000;
pub const DEFAULT_RSD_ITERATIONS: usize = 500;

// numeric tolerance for row sums, utilities, and percentage totals
pub const TOLERANCE: f64 = 1e-6;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// derive an independent child PRNG from a seed and a stream index.
/// hashing yields deterministic, reproducible sampling no matter
/// which order the streams are consumed in.
pub fn stream(seed: Seed, index: usize) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    use std::hash::DefaultHasher;
    use std::hash::Hash;
    use std::hash::Hasher;
    let ref mut hasher = DefaultHasher::new();
    seed.hash(hasher);
    index.hash(hasher);
    rand::rngs::SmallRng::seed_from_u64(hasher.finish())
}

/// progress bar
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_secs(1);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let progress = indicatif::ProgressBar::new(n as u64);
    progress.set_style(style);
    progress.enable_steady_tick(tick);
    progress
}

/// initialize terminal logging
pub fn init() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
