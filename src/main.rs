//! bitaddr - Bitcoin key pair and address generator
//!
//! Usage:
//!   bitaddr                                # random mainnet key pair
//!   bitaddr -n test -u                     # testnet, uncompressed public key
//!   bitaddr --seed "my phrase" -r 100000   # deterministic paper-wallet key
//!   bitaddr --decode 1F1Pn2y6pDb68E5nYJJeba4TLg2U7B6KF1

use std::process;

use clap::Parser;

use bitaddr::{
    Config, KeyError, KeyPairReport, address_network, decode_address, describe_keypair,
    generate_keypair, import_private_key,
};

fn main() {
    let config = Config::parse();

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {e}");
        process::exit(1);
    }

    if let Some(address) = &config.decode {
        let decoded = decode_address(address)
            .and_then(|pkb_hash| Ok((address_network(address)?, pkb_hash)));
        match decoded {
            Ok((network, pkb_hash)) => {
                println!("network: {network}");
                println!("public key hash:");
                println!("{}", hex::encode(pkb_hash));
            }
            Err(e) => fail(e),
        }
        return;
    }

    let report = match &config.import_wif {
        Some(wif) => import_private_key(wif).map(|imported| {
            describe_keypair(&imported.key, imported.network, imported.compressed)
        }),
        None => generate_keypair(
            config.network,
            config.compressed(),
            config.seed.as_deref(),
            config.rounds,
        ),
    };

    match report {
        Ok(report) => print_report(&report),
        Err(e) => fail(e),
    }
}

fn print_report(report: &KeyPairReport) {
    println!("secret key:");
    println!("0x{}", report.private_key_hex);
    println!("wif:");
    println!("{}", report.wif);
    println!("public key:");
    println!("x: {}", report.public_key_x_hex);
    println!("y: {}", report.public_key_y_hex);
    println!("bitcoin address:");
    println!("{}", report.address);
}

fn fail(e: KeyError) -> ! {
    eprintln!("Error: {e}");
    process::exit(1);
}
