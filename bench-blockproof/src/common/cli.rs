use clap::Parser;
use serde::Serialize;

/// Benchmark the double interval Merkle tree: build a block from a
/// generated workload, produce the double proof for every committed
/// update, and verify them all against the block root.
#[derive(Parser, Debug, Serialize, Clone)]
pub struct BenchmarkCli {
    /// Number of owner addresses in the generated block
    #[arg(long, default_value_t = 1024)]
    pub address_count: usize,

    /// Number of state updates per owner
    #[arg(long, default_value_t = 16)]
    pub updates_per_address: usize,

    /// Seed for the LFSR workload generator (must be non-zero)
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Only measure build and proof generation, skip verification
    #[arg(long)]
    pub skip_verify: bool,

    /// Output filename for the JSON summary; prints to stdout if empty
    #[arg(long, default_value = "")]
    pub output: String,
}
