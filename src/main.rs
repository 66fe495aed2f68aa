//! Shiftcert CLI - track trainees through their certification shifts

use clap::Parser;
use shiftcert::cli::commands::{effectiveness, init, record_test, schedule, signoff, trainee};
use shiftcert::cli::{Cli, Commands};
use shiftcert::errors::to_exit_code;
use shiftcert::schemas::Readiness;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error [{}]: {}", e.code(), e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> shiftcert::Result<()> {
    let cwd = cli.cwd.as_deref();
    match cli.command {
        Some(Commands::Init { force }) => init::run(cwd, force).await,
        Some(Commands::AddTrainee { store, employee, name }) => {
            trainee::add(cwd, &store, &employee, &name).await
        }
        Some(Commands::List { json, store, archived }) => {
            trainee::list(cwd, json, store.as_deref(), archived).await
        }
        Some(Commands::Show { trainee: id, json }) => trainee::show(cwd, &id, json).await,
        Some(Commands::Audit { target, json }) => {
            trainee::audit(cwd, &target.trainee, target.shift, json).await
        }
        Some(Commands::Schedule { target, when, trainer }) => {
            schedule::schedule(cwd, &target.trainee, target.shift, when, trainer.as_deref()).await
        }
        Some(Commands::Assign { target, trainer }) => {
            schedule::assign(cwd, &target.trainee, target.shift, &trainer).await
        }
        Some(Commands::Coverage { store, include_pending, json }) => {
            schedule::coverage(cwd, &store, include_pending, json).await
        }
        Some(Commands::Claim { target, trainer }) => {
            schedule::claim(cwd, &target.trainee, target.shift, &trainer).await
        }
        Some(Commands::Approve { target }) => {
            schedule::approve(cwd, &target.trainee, target.shift).await
        }
        Some(Commands::RejectClaim { target }) => {
            schedule::reject(cwd, &target.trainee, target.shift).await
        }
        Some(Commands::Claims { trainer, json }) => schedule::claims(cwd, &trainer, json).await,
        Some(Commands::Checklist { target, item, value, author, json }) => {
            signoff::checklist(
                cwd,
                &target.trainee,
                target.shift,
                item.as_deref(),
                value.as_deref(),
                &author,
                json,
            )
            .await
        }
        Some(Commands::Feedback { target, feedback }) => {
            signoff::feedback(cwd, &target.trainee, target.shift, feedback).await
        }
        Some(Commands::SignTrainer {
            target,
            trainer,
            knowledge,
            execution,
            confidence,
            feedback,
        }) => {
            let readiness = Readiness {
                knowledge,
                execution,
                confidence,
            };
            signoff::sign_trainer(cwd, &target.trainee, target.shift, &trainer, readiness, feedback)
                .await
        }
        Some(Commands::SignManager { target, manager }) => {
            signoff::sign_manager(cwd, &target.trainee, target.shift, &manager).await
        }
        Some(Commands::Archive { trainee: id }) => trainee::archive(cwd, &id).await,
        Some(Commands::Restart { trainee: id }) => trainee::restart(cwd, &id).await,
        Some(Commands::Note { trainee: id, text, author }) => {
            trainee::note(cwd, &id, &text, &author).await
        }
        Some(Commands::VerbalCert { trainee: id, by }) => trainee::verbal_cert(cwd, &id, &by).await,
        Some(Commands::RecordTest { trainee: id, test, score, passed }) => {
            record_test::run(cwd, &id, &test, score, passed).await
        }
        Some(Commands::Effectiveness { trainer, store, json }) => {
            effectiveness::effectiveness(cwd, &trainer, store.as_deref(), json).await
        }
        Some(Commands::Leaderboard { store, json }) => {
            effectiveness::leaderboard(cwd, &store, json).await
        }
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
