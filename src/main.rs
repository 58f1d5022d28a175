use clap::Parser;

mod args;
mod rp;

fn main() {
    let args = args::Args::parse();
    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
    rp::run_app(args);
}
