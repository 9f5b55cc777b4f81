use clap::{
    Parser,
    Subcommand,
};
use log::{
    error,
    info,
};

use cfr::{
    config::{
        CfrConfig,
        RegretMatchingArgs,
        RegretMatchingConfig,
        TrainingArgs,
    },
    error::Result,
    games::kuhn::Kuhn,
    solvers::{
        cfr::Trainer,
        regret_matching::{
            self,
            format_strategy,
        },
    },
};

#[derive(Parser)]
struct AppArgs {
    #[clap(subcommand)]
    game: Game,
}

#[derive(Subcommand)]
pub enum Game {
    /// Regret matching against a fixed rock-paper-scissors opponent.
    Rps(RegretMatchingArgs),
    /// CFR on N-player Kuhn poker.
    Kuhn(TrainingArgs),
}

fn run(args: AppArgs) -> Result<()> {
    match args.game {
        Game::Rps(rps_args) => {
            let config = RegretMatchingConfig::try_from(&rps_args)?;
            let mut trainer = regret_matching::Trainer::new(&config)?;
            let strategy = trainer.train();
            println!("{}", format_strategy(&strategy));
        }
        Game::Kuhn(training_args) => {
            let config = CfrConfig::try_from(&training_args)?;
            let game = Kuhn::new(training_args.players)?;
            info!("{}-player Kuhn poker, deck: {:?}", training_args.players, game.deck());
            let mut trainer = Trainer::new(game, &config);
            trainer.train()?;
            trainer.print_strategy(training_args.threshold);
        }
    }
    Ok(())
}

fn main() {
    // Initialize env_logger with a default log level of INFO.
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    if let Err(e) = run(AppArgs::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}
