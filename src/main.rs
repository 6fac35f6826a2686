use anyhow::Context;
use clap::Parser;
use interlining::common::{Record, Table};
use interlining::store::{SaveOutcome, Store};
use interlining::{cli, config, export, form, logging, render};
use cli::{Cli, Commands};
use config::Config;
use std::path::Path;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load().context("設定の読み込みに失敗")?;
    let data_file = config.resolve_data_file(cli.data_file.as_deref());
    let mut store = Store::open(data_file);

    match cli.command {
        Commands::Entry => {
            println!("データ入力 ({})\n", store.path().display());
            let record = form::prompt_record()?;
            let saved = report(&store.append(&record));
            return Ok(if saved { ExitCode::SUCCESS } else { ExitCode::FAILURE });
        }

        Commands::Add { json } => {
            let content = std::fs::read_to_string(&json)
                .with_context(|| format!("読み込み失敗: {}", json.display()))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("JSON解析失敗: {}", json.display()))?;
            let items = match value {
                serde_json::Value::Array(items) => items,
                other => vec![other],
            };

            let mut code = ExitCode::SUCCESS;
            for (i, item) in items.iter().enumerate() {
                print!("[{}/{}] ", i + 1, items.len());
                let parsed = Record::from_json(item).and_then(|r| r.validate().map(|_| r));
                match parsed {
                    Ok(record) => {
                        if !report(&store.append(&record)) {
                            code = ExitCode::FAILURE;
                        }
                    }
                    Err(e) => {
                        println!("✘ {}", e);
                        code = ExitCode::FAILURE;
                    }
                }
            }
            return Ok(code);
        }

        Commands::Retrieve { filters, interactive, output, json } => {
            let criteria = if interactive {
                form::prompt_criteria()?
            } else {
                filters.to_criteria()
            };

            let selection = store.retrieve(&criteria)?;
            if selection.is_no_match() {
                println!("No matching records found.");
                return Ok(ExitCode::SUCCESS);
            }
            show(selection.table(), json, output.as_deref())?;
        }

        Commands::Show => {
            let table = store.load()?.clone();
            if table.is_empty() {
                println!("レコードがありません: {}", store.path().display());
                return Ok(ExitCode::SUCCESS);
            }
            show(&table, false, None)?;
        }

        Commands::Config { set_data_file, show } => {
            let mut config = config;

            if let Some(path) = set_data_file {
                config.set_data_file(path)?;
                println!("✔ 台帳ファイルを設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  台帳ファイル: {}", config.data_file.display());
                println!("  使用中: {}", store.path().display());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// 追記結果を表示（失敗時はfalse）
fn report(outcome: &SaveOutcome) -> bool {
    match outcome {
        SaveOutcome::Saved => println!("✔ {}", outcome.message()),
        SaveOutcome::Duplicate => println!("⚠ {}", outcome.message()),
        SaveOutcome::Failed(_) => println!("✘ {}", outcome.message()),
    }
    !matches!(outcome, SaveOutcome::Failed(_))
}

fn show(table: &Table, json: bool, output: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = output {
        export::export_table(table, path)?;
        println!("✔ {} 件を保存しました: {}", table.len(), path.display());
    } else if json {
        println!("{}", serde_json::to_string_pretty(table)?);
    } else {
        render::print_table(table)?;
    }
    Ok(())
}
