mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;

use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::domain::scale::{from_centimeters, from_feet, from_meters};
use common::domain::{EffectiveConfig, ModelId, ScalePreset};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::{Command, ScaleRequest};
use ports::inbound::UseCaseRunner;
use usecase::{AddModelOutcome, ExportResult};
use wiring::{wire_arview, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let command = config_to_command(&config);
        let name = command.name();
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("main")
                .kind("lifecycle")
                .field("command", name),
        );
        let result = self.dispatch(command);
        let record = match &result {
            Ok(code) => LogRecord::new(LogLevel::Info, "command finished").field("exit_code", *code as i64),
            Err(e) => LogRecord::new(LogLevel::Error, "command failed")
                .field("error", e.to_string())
                .field("exit_code", e.exit_code() as i64),
        };
        let _ = self
            .app
            .logger
            .log(&record.layer("main").kind("lifecycle").field("command", name));
        result
    }
}

impl Runner {
    fn dispatch(&self, command: Command) -> Result<i32, Error> {
        match command {
            Command::Help => {
                print_help();
                Ok(0)
            }
            Command::Init { force } => {
                let result = self.app.init_use_case.run(force)?;
                report_written("model store", &result.store_location, result.store_written);
                report_written(
                    "page config",
                    &result.ar_config_path.display().to_string(),
                    result.ar_config_written,
                );
                Ok(0)
            }
            Command::List => {
                let catalog = self.app.catalog_use_case.load()?;
                print_model_list(&catalog.list());
                Ok(0)
            }
            Command::Show { id } => {
                let catalog = self.app.catalog_use_case.load()?;
                match catalog.get(&id) {
                    Some(effective) => {
                        println!("{}", serde_json::to_string_pretty(&effective)?);
                        Ok(0)
                    }
                    None => Ok(not_found(&id)),
                }
            }
            Command::Attrs { id, json } => {
                let catalog = self.app.catalog_use_case.load()?;
                let Some(effective) = catalog.get(&id) else {
                    return Ok(not_found(&id));
                };
                let attrs = effective.viewer_attributes();
                if json {
                    println!("{}", serde_json::to_string_pretty(&attrs)?);
                } else {
                    println!("{}", attrs.to_html());
                }
                Ok(0)
            }
            Command::Url { id } => {
                let catalog = self.app.catalog_use_case.load()?;
                match catalog.url(&id) {
                    Some(url) => {
                        println!("{}", url);
                        Ok(0)
                    }
                    None => Ok(not_found(&id)),
                }
            }
            Command::AddModel(args) => match self.app.add_model_use_case.run(&args)? {
                AddModelOutcome::Added {
                    effective,
                    url,
                    replaced,
                } => {
                    if !effective.id.is_conventional() {
                        eprintln!(
                            "arview: warning: model id '{}' is not lowercase-with-hyphens",
                            effective.id
                        );
                    }
                    if replaced {
                        println!("Replaced model '{}'", effective.id);
                    } else {
                        println!("Added model '{}'", effective.id);
                    }
                    println!("  scale: {}  placement: {}", effective.display.ar_scale, effective.display.ar_placement);
                    println!("  url:   {}", url);
                    println!("Next: arview generate-qr \"{}\" {}.png", url, effective.id);
                    Ok(0)
                }
                // 取り消しは失敗ではない
                AddModelOutcome::Cancelled => {
                    eprintln!("Cancelled. Nothing was written.");
                    Ok(0)
                }
            },
            Command::GenerateQr { url, output, options } => {
                let result = self.app.export_qr_use_case.run(&url, output.as_deref(), &options)?;
                print_export_result(&result);
                Ok(0)
            }
            Command::Qr { id, output, options } => {
                let catalog = self.app.catalog_use_case.load()?;
                let Some(url) = catalog.url(&id) else {
                    return Ok(not_found(&id));
                };
                let output = output.unwrap_or_else(|| format!("{}-qr.png", id).into());
                let result = self.app.export_qr_use_case.run(&url, Some(output.as_path()), &options)?;
                print_export_result(&result);
                Ok(0)
            }
            Command::PageConfig => {
                let projection = self.app.page_config_use_case.project()?;
                println!("{}", serde_json::to_string_pretty(&projection)?);
                Ok(0)
            }
            Command::Scale(request) => run_scale(request),
        }
    }
}

/// 未登録 ID はエラーではなく終了コード 1
fn not_found(id: &str) -> i32 {
    eprintln!("arview: model not found: {}", id);
    1
}

fn report_written(what: &str, location: &str, written: bool) {
    if written {
        println!("Wrote {} to {}", what, location);
    } else {
        println!("Kept existing {} at {} (use --force to overwrite)", what, location);
    }
}

fn print_model_list(models: &[EffectiveConfig]) {
    if models.is_empty() {
        println!("(no models)");
        return;
    }
    println!("{:<24} {:<16} {:<8} {}", "ID", "SCALE", "PLACE", "NAME");
    for m in models {
        println!(
            "{:<24} {:<16} {:<8} {}",
            &*m.id,
            m.display.ar_scale,
            m.display.ar_placement.as_str(),
            m.name
        );
    }
}

fn print_export_result(result: &ExportResult) {
    println!("QR code for {}", result.url);
    println!("  {} ({}x{})", result.png_path.display(), result.pixel_size, result.pixel_size);
    println!("  {}", result.svg_path.display());
    println!("  {}", result.html_path.display());
}

fn run_scale(request: ScaleRequest) -> Result<i32, Error> {
    let positive = |v: f64, unit: &str| {
        if v.is_finite() && v > 0.0 {
            Ok(v)
        } else {
            Err(Error::invalid_argument(format!("{} must be a positive number", unit)))
        }
    };
    match request {
        ScaleRequest::Meters(v) => println!("{}", from_meters(positive(v, "meters")?)),
        ScaleRequest::Centimeters(v) => println!("{}", from_centimeters(positive(v, "centimeters")?)),
        ScaleRequest::Feet(v) => println!("{}", from_feet(positive(v, "feet")?)),
        ScaleRequest::Preset(name) => {
            let preset = name.parse::<ScalePreset>().map_err(Error::invalid_argument)?;
            println!("{}", preset.scale());
        }
        ScaleRequest::ListPresets => {
            for p in ScalePreset::ALL {
                println!("{:<14} {:<18} {}", p.name(), p.scale(), p.description());
            }
        }
    }
    Ok(0)
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("arview: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: arview [-h] [-v] [-d|--home-dir directory] [-m|--models file] [--base-url url] <command> [args...]");
}

fn print_help() {
    println!("Usage: arview [-h] [-v] [-d|--home-dir directory] [-m|--models file] [--base-url url] <command> [args...]");
    println!("  -h, --help            Display this help message.");
    println!("  -v, --verbose         Write debug records to the log file.");
    println!("  -d, --home-dir        Specify a home directory (sets ARVIEW_HOME for this process).");
    println!("  -m, --models          Model store file. Default: <config>/models.json.");
    println!("  --base-url <url>      Base URL of the model pages.");
    println!("  --generate <shell>    Generate shell completion script (bash, zsh, fish).");
    println!();
    println!("Environment:");
    println!("  ARVIEW_HOME       Home directory (config/ and state/). Default: XDG config/state dirs.");
    println!("  ARVIEW_MODELS     Model store file (overridden by -m).");
    println!("  ARVIEW_BASE_URL   Base URL (overridden by --base-url).");
    println!();
    println!("Commands:");
    println!("  init [--force]                 Write a starter model store and page config.");
    println!("  list                           List models (the authoring template is hidden).");
    println!("  show <id>                      Print the effective configuration as JSON.");
    println!("  attrs <id> [--json]            Print viewer attributes.");
    println!("  url <id>                       Print the model page URL.");
    println!("  add-model [--yes] [fields...]  Add a model record (interactive unless --yes).");
    println!("  generate-qr <url> [outputFile] Write PNG, SVG and an HTML preview for a URL.");
    println!("  qr <id> [outputFile]           Same as generate-qr for a model page.");
    println!("  page-config                    Print the page config projection as JSON.");
    println!("  scale [--meters|--centimeters|--feet <n>|--preset <name>]");
    println!("                                 Convert a size to an AR scale string.");
    println!();
    println!("Model IDs should be lowercase-with-hyphens (e.g. {}).", ModelId::new("terraced-scene"));
}

pub fn run() -> Result<i32, Error> {
    let outcome = parse_args()?;
    let config = match outcome {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    // -d/--home-dir 指定時は ARVIEW_HOME を設定し、resolve_dirs() がその配下を使うようにする
    if let Some(ref h) = config.home_dir {
        std::env::set_var("ARVIEW_HOME", h);
    }
    let app = wire_arview(&config.wiring_options());
    let runner = Runner { app };
    runner.run(config)
}
