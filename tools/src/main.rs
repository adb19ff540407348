//! sim-runner: headless runner for the startup simulation.
//!
//! Usage:
//!   sim-runner --seed 12345 --months 36 --hires 3 --sales-spend 5000
//!   sim-runner --seed 12345 --config calibration.json --ipc-mode

use anyhow::Result;
use runway_core::{
    command::PlayerCommand, config::SimConfig, session::Session, snapshot::SimSnapshot,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick {
        count: u64,
    },
    Command {
        cmd: String,
        #[serde(default)]
        payload: serde_json::Value,
    },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let months = parse_arg(&args, "--months", 36u64);
    let hires = parse_arg(&args, "--hires", 0u32);
    let sales_spend = parse_arg(&args, "--sales-spend", 0.0f64);
    let price: Option<f64> = args
        .windows(2)
        .find(|w| w[0] == "--price")
        .and_then(|w| w[1].parse().ok());
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    if !ipc_mode {
        println!("runway sim-runner");
        println!("  seed:        {seed}");
        println!("  months:      {months}");
        println!("  hires:       {hires}");
        println!("  sales spend: {sales_spend}");
        println!("  config:      {}", config_path.unwrap_or("(defaults)"));
        println!();
    }

    let mut session = Session::new(config, seed)?;
    for _ in 0..hires {
        session.apply(PlayerCommand::HireDeveloper)?;
    }
    session.apply(PlayerCommand::SetSalesSpend { amount: sales_spend })?;
    if let Some(price) = price {
        session.apply(PlayerCommand::SetProductPrice { price })?;
    }

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        for _ in 0..months {
            session.tick()?;
            let snap = session.snapshot();
            log::info!(
                "month={} cash={:.0} users={} mrr={:.0} maturity={:.4} debt={:.3}",
                snap.month,
                snap.cash,
                snap.total_users,
                snap.mrr,
                snap.product_maturity,
                snap.technical_debt
            );
        }
        print_summary(&session.snapshot(), session.seed(), months);
    }

    Ok(())
}

fn run_ipc_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        let outcome = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Tick { count } => session.run_months(count).map(|_| ()),
            IpcCommand::GetState => Ok(()),
            IpcCommand::Command { cmd, payload } => match parse_command(&cmd, payload) {
                Ok(command) => session.apply(command).map(|_| ()),
                Err(e) => {
                    log::warn!("Unknown command: {cmd}");
                    write_error(&mut stdout, &e.to_string())?;
                    continue;
                }
            },
        };

        match outcome {
            Ok(()) => writeln!(stdout, "{}", serde_json::to_string(&session.snapshot())?)?,
            Err(e) => write_error(&mut stdout, &e.to_string())?,
        }
        stdout.flush()?;
    }
    Ok(())
}

/// `{"cmd": "...", "payload": {...}}` becomes a `PlayerCommand` by
/// folding the name into the payload object.
fn parse_command(cmd: &str, payload: serde_json::Value) -> serde_json::Result<PlayerCommand> {
    let mut object = match payload {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    object.insert("cmd".into(), serde_json::Value::String(cmd.to_string()));
    serde_json::from_value(serde_json::Value::Object(object))
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{}", err_json)?;
    stdout.flush()?;
    Ok(())
}

fn print_summary(snap: &SimSnapshot, seed: u64, months: u64) {
    println!("=== RUN SUMMARY ===");
    println!("  seed:           {seed}");
    println!("  months run:     {months}");
    println!("  final month:    {}", snap.month);
    println!("  cash:           ${:.0}", snap.cash);
    println!("  bankrupt:       {}", snap.bankrupt);
    println!("  headcount:      {}", snap.headcount);
    println!("  payroll:        ${:.0}/mo", snap.payroll);
    println!("  users:          {}", snap.total_users);
    println!("  mrr:            ${:.0}", snap.mrr);
    println!("  churn rate:     {:.2}%", snap.churn_rate * 100.0);
    println!("  reputation:     {:.3}", snap.reputation);

    println!();
    println!("=== PRODUCT ===");
    println!("  maturity:       {:.4}", snap.product_maturity);
    println!("  launched:       {}", snap.launched);
    match snap.market_ready_month {
        Some(m) => println!("  market ready:   month {m}"),
        None => println!("  market ready:   (not scheduled)"),
    }
    println!("  tech debt:      {:.3} (target {:.2})", snap.technical_debt, snap.technical_debt_target);
    println!(
        "  output:         {:.3} ({:.0}% clean-up)",
        snap.current_output,
        snap.allocation.cleanup_fraction * 100.0
    );
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
