use clap::Parser;
use modelconf::Settings;
use modelconf::cli::commands::{diff, generate, init, patch, run};
use modelconf::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Init must work before any configuration exists
    if let Commands::Init { force } = cli.command {
        modelconf::logging::init();
        exit_on_error(init::run_init(force).map(|_| ()));
        return;
    }

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    modelconf::logging::init_with_config(&settings.logging);

    let result = match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Config => init::run_config(&settings),
        Commands::Generate {
            model,
            root,
            out,
            cardinality,
        } => generate::run_generate(&settings, model, root, out, cardinality.map(Into::into))
            .map(|_| ()),
        Commands::Diff {
            base,
            patched,
            output,
        } => diff::run_diff(&settings, base, patched, output).map(|_| ()),
        Commands::Patch {
            base,
            delta,
            output,
            mode,
        } => patch::run_patch(&settings, base, delta, output, mode.map(Into::into)).map(|_| ()),
        Commands::Run => run::run_all(&settings),
    };

    exit_on_error(result);
}

fn exit_on_error(result: anyhow::Result<()>) {
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
