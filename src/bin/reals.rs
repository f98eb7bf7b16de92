//! Prints a handful of example constants to a requested precision.

use clap::{Parser, ValueEnum};
use log::info;
use reals::real::constants;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Constant {
    /// `pi - 3`.
    PiMinusThree,
    /// `pi / 4`.
    PiOver4,
    /// `log(2)`.
    Log2,
}

#[derive(Parser, Debug)]
#[command(name = "reals", version, about = "Exact real arithmetic over LFT digit streams")]
struct Cli {
    /// Which constant to print.
    #[arg(value_enum)]
    constant: Constant,

    /// How many bits of fractional precision to resolve.
    #[arg(short, long, default_value_t = 256)]
    precision_bits: usize,

    /// Print as a signed hexadecimal fraction instead of a decimal interval.
    #[arg(long)]
    hex: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let value = match cli.constant {
        Constant::PiMinusThree => constants::pi_minus_three(),
        Constant::PiOver4 => constants::pi_over_4(),
        Constant::Log2 => constants::log2(),
    };

    info!("resolving {:?} to {} bits", cli.constant, cli.precision_bits);
    if cli.hex {
        let hex_digits = cli.precision_bits / 4 + 1;
        println!("0x{}", value.format_hex(hex_digits));
    } else {
        println!("{}", value.format_decimal(0, cli.precision_bits));
    }
}
