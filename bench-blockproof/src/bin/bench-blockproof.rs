// Benchmark for the double interval Merkle tree:
// - generate an LFSR-derived workload of address groups
// - build the block (both tree layers)
// - generate the double proof for every (address, update) position
// - verify every proof against the block root
use bench_blockproof::common::{cli::BenchmarkCli, generators};
use clap::Parser;
use imtree::Block;
use log::info;
use serde_json::json;
use std::fs;
use std::time::Instant;

fn main() {
    env_logger::init();
    let args = BenchmarkCli::parse();
    let update_count = args.address_count * args.updates_per_address;
    info!(
        "generating workload: {} addresses x {} updates",
        args.address_count, args.updates_per_address
    );
    let groups = generators::generate_groups(args.address_count, args.updates_per_address, args.seed);

    let started = Instant::now();
    let block = Block::build(groups.clone()).unwrap();
    let build_seconds = started.elapsed().as_secs_f64();
    info!(
        "built block of {} updates in {:.3}s, root 0x{}",
        update_count,
        build_seconds,
        hex::encode(&block.root().hash)
    );

    let started = Instant::now();
    let mut proofs = Vec::with_capacity(update_count);
    for ap in 0..args.address_count {
        for sp in 0..args.updates_per_address {
            proofs.push(block.get_inclusion_proof(ap, sp).unwrap());
        }
    }
    let prove_seconds = started.elapsed().as_secs_f64();
    info!("generated {} double proofs in {:.3}s", proofs.len(), prove_seconds);

    let verify_seconds = if args.skip_verify {
        0.0
    } else {
        let started = Instant::now();
        for ap in 0..args.address_count {
            for sp in 0..args.updates_per_address {
                let update = &groups[ap].updates[sp];
                let proof = &proofs[ap * args.updates_per_address + sp];
                Block::verify_double_proof(update, proof, &block.root().hash).unwrap();
            }
        }
        let verify_seconds = started.elapsed().as_secs_f64();
        info!("verified {} double proofs in {:.3}s", proofs.len(), verify_seconds);
        verify_seconds
    };

    let summary = json!({
        "args": args.clone(),
        "update_count": update_count,
        "build_seconds": build_seconds,
        "prove_seconds": prove_seconds,
        "verify_seconds": verify_seconds,
        "proofs_per_second": if verify_seconds > 0.0 {
            proofs.len() as f64 / verify_seconds
        } else {
            0.0
        },
    });
    let rendered = serde_json::to_string_pretty(&summary).unwrap();
    if args.output.is_empty() {
        println!("{}", rendered);
    } else {
        fs::write(&args.output, rendered).unwrap();
    }
}
