use clap::Parser;
use std::io::{BufRead, Write};
use swim_tracker::core::form::SwimForm;
use swim_tracker::core::ledger::{format_km, paginate, write_csv};
use swim_tracker::core::SwimApi;
use swim_tracker::domain::model::{Dashboard, SwimId};
use swim_tracker::utils::error::ErrorSeverity;
use swim_tracker::utils::{logger, validation::Validate};
use swim_tracker::{
    CliConfig, Command, FileTokenStore, HttpSwimApi, Result, SessionGate, Tracker, TrackerError,
};

#[tokio::main]
async fn main() {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config.command);

    if let Err(e) = config.load_config_file().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(e.severity()));
    }

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let code = exit_code(e.severity());
        if code > 0 {
            std::process::exit(code);
        }
    }
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

async fn run(config: CliConfig) -> Result<()> {
    let gate = SessionGate::new(FileTokenStore::new(config.session_file()));
    let mut tracker = Tracker::new(HttpSwimApi::new(&config));

    match config.command {
        Command::Status => {
            let dashboard = tracker.refresh().await;
            print_status(&dashboard);
        }
        Command::List { page, page_size } => {
            let dashboard = tracker.refresh().await;
            let page = paginate(&dashboard.swims, page, page_size)?;

            println!(
                "{:<12} {:<10} {:>12}  {:<16} Etappe",
                "ID", "Datum", "Strecke in m", "Dolphin"
            );
            for swim in page.rows {
                println!(
                    "{:<12} {:<10} {:>12}  {:<16} {}",
                    swim.id.to_string(),
                    swim.date,
                    swim.distance_meters,
                    swim.name,
                    swim.comment
                );
            }
            println!(
                "Page {}/{} ({} swims)",
                page.page, page.page_count, page.total_rows
            );
        }
        Command::Add {
            date,
            distance,
            name,
            comment,
        } => {
            require_login(&gate, tracker.api()).await?;

            let mut form = SwimForm::new();
            form.set_date(date.as_deref())?;
            form.set_field("strecke", &distance)?;
            form.set_field("dolphin", &name)?;
            form.set_field("etappe", &comment)?;

            let dashboard = tracker.add(&form).await?;
            println!("✅ Saved");
            print_status(&dashboard);
        }
        Command::Delete { ids, yes } => {
            require_login(&gate, tracker.api()).await?;

            let ids: Vec<SwimId> = ids.iter().map(|id| SwimId::from(id.as_str())).collect();
            let count = ids.len();
            tracker.select(ids);

            let confirmed = yes || confirm(&format!("Delete {} selected swims?", count))?;
            let dashboard = tracker.delete_selected(confirmed).await?;
            if confirmed {
                println!("🗑  Deleted {} swims", count);
                print_status(&dashboard);
            } else {
                println!("Nothing deleted");
            }
        }
        Command::Export { output } => {
            let dashboard = tracker.refresh().await;
            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)?;
                    write_csv(&dashboard.swims, file)?;
                    println!("📁 {} swims written to {}", dashboard.swims.len(), path);
                }
                None => write_csv(&dashboard.swims, std::io::stdout().lock())?,
            }
        }
        Command::Login { token } => {
            let expected = tracker.api().session_token().await?;
            if !gate.login(&token, &expected)? {
                return Err(TrackerError::WrongToken);
            }
            println!("✅ Logged in");
        }
        Command::Logout => {
            gate.logout()?;
            println!("Logged out");
        }
    }

    Ok(())
}

async fn require_login<T, A>(gate: &SessionGate<T>, api: &A) -> Result<()>
where
    T: swim_tracker::core::TokenStore,
    A: SwimApi,
{
    let expected = api.session_token().await?;
    if gate.is_logged_in(&expected)? {
        Ok(())
    } else {
        Err(TrackerError::NotLoggedIn)
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "ja"))
}

fn print_status(dashboard: &Dashboard) {
    let progress = &dashboard.progress;
    println!("{} km swum", format_km(dashboard.total_meters));
    println!(
        "Route: {}/{} points reached, {:.1}% of {} km, {} km to go",
        progress.swum_vertices,
        progress.total_vertices,
        progress.completion * 100.0,
        format_km(progress.route_meters),
        format_km(progress.remaining_meters)
    );
    if let Some(last) = progress.swum.last() {
        println!("Last point reached: {:.5}, {:.5}", last.lat, last.lng);
    }
}
