use crate::domain::{AddModelArgs, Command, ErrorCorrection, QrFormat, QrOptions, ScaleRequest, MAX_QR_MARGIN, MAX_QR_WIDTH};
use crate::wiring::WiringOptions;
use clap::builder::ArgAction;
use clap::{value_parser, ArgGroup};
use clap_complete::Shell;
use common::builder::{RecordInputs, ScaleChoice};
use common::error::Error;
use std::ffi::OsString;
use std::path::PathBuf;

/// CLI から受け取った設定
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: debug レベルまでログに残す
    pub verbose: bool,
    /// -d / --home-dir: このプロセスの ARVIEW_HOME を設定する
    pub home_dir: Option<String>,
    /// -m / --models: モデルストアのパス
    pub models: Option<PathBuf>,
    pub base_url: Option<String>,
    pub command: Command,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            verbose: false,
            home_dir: None,
            models: None,
            base_url: None,
            command: Command::Help,
        }
    }
}

impl Config {
    pub fn wiring_options(&self) -> WiringOptions {
        WiringOptions {
            models_path: self.models.clone(),
            base_url: self.base_url.clone(),
            verbose: self.verbose,
        }
    }
}

/// 解析結果: 通常の Config または補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn global_args(cmd: clap::Command) -> clap::Command {
    cmd.disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Write debug records to the log file")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("home-dir")
                .short('d')
                .long("home-dir")
                .value_name("directory")
                .help("Specify a home directory (sets ARVIEW_HOME for this process)")
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("models")
                .short('m')
                .long("models")
                .value_name("file")
                .help("Model store file (default: <config>/models.json)")
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("base-url")
                .long("base-url")
                .value_name("url")
                .help("Base URL of the model pages")
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

/// サブコマンドでも -h はグローバルの help フラグで受ける
fn sub(name: &'static str) -> clap::Command {
    clap::Command::new(name).disable_help_flag(true)
}

fn id_arg() -> clap::Arg {
    clap::Arg::new("id").value_name("id").help("Model ID").required(true)
}

fn qr_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        clap::Arg::new("output")
            .value_name("outputFile")
            .help("PNG output path; .svg and .html are written next to it (default: qr-code.png)")
            .value_parser(value_parser!(PathBuf)),
    )
    .arg(
        clap::Arg::new("format")
            .long("format")
            .value_name("png|svg")
            .help("Image embedded in the preview page")
            .value_parser(|s: &str| s.parse::<QrFormat>())
            .num_args(1),
    )
    .arg(
        clap::Arg::new("width")
            .long("width")
            .value_name("px")
            .help("Image width in pixels, 1-4096 (default: 512)")
            .value_parser(value_parser!(u32).range(1..=i64::from(MAX_QR_WIDTH)))
            .num_args(1),
    )
    .arg(
        clap::Arg::new("margin")
            .long("margin")
            .value_name("modules")
            .help("Quiet zone in modules, 0-64 (default: 2)")
            .value_parser(value_parser!(u32).range(0..=i64::from(MAX_QR_MARGIN)))
            .num_args(1),
    )
    .arg(
        clap::Arg::new("dark")
            .long("dark")
            .value_name("#rrggbb")
            .help("Foreground color (default: #000000)")
            .num_args(1),
    )
    .arg(
        clap::Arg::new("light")
            .long("light")
            .value_name("#rrggbb")
            .help("Background color (default: #ffffff)")
            .num_args(1),
    )
    .arg(
        clap::Arg::new("ec")
            .long("ec")
            .value_name("L|M|Q|H")
            .help("Error correction level (default: H)")
            .value_parser(|s: &str| s.parse::<ErrorCorrection>())
            .num_args(1),
    )
}

fn build_add_model_subcommand() -> clap::Command {
    let text = |name: &'static str, help: &'static str| {
        clap::Arg::new(name).long(name).value_name(name).help(help).num_args(1)
    };
    sub("add-model")
        .about("Add a model record (asks for missing fields unless --yes)")
        .arg(text("id", "Model ID (lowercase-with-hyphens)"))
        .arg(text("name", "Display name"))
        .arg(text("description", "Description"))
        .arg(text("client", "Client name"))
        .arg(text("src", "Model file name or URL (GLB/GLTF)"))
        .arg(text("poster", "Poster image file name"))
        .arg(text("scale", "Scale preset name or \"x y z\""))
        .arg(text("placement", "AR placement: floor or wall"))
        .arg(text("date", "Project date"))
        .arg(text("type", "Project type"))
        .arg(text("status", "Project status"))
        .arg(text("color", "Theme primary color"))
        .arg(
            clap::Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Do not prompt; fail if a required field is missing")
                .action(ArgAction::SetTrue),
        )
}

fn build_scale_subcommand() -> clap::Command {
    let number = |name: &'static str, help: &'static str| {
        clap::Arg::new(name)
            .long(name)
            .value_name("value")
            .help(help)
            .value_parser(value_parser!(f64))
            .allow_negative_numbers(true)
            .num_args(1)
    };
    sub("scale")
        .about("Convert a real-world size to an AR scale string")
        .arg(number("meters", "Size in meters"))
        .arg(number("centimeters", "Size in centimeters"))
        .arg(number("feet", "Size in feet"))
        .arg(
            clap::Arg::new("preset")
                .long("preset")
                .value_name("name")
                .help("Named preset (architectural, furniture, product, building, landscape)")
                .num_args(1),
        )
        .group(
            ArgGroup::new("source")
                .args(["meters", "centimeters", "feet", "preset"])
                .multiple(false),
        )
}

pub(crate) fn build_clap_command() -> clap::Command {
    global_args(
        clap::Command::new("arview")
            .disable_help_subcommand(true)
            .about("AR model viewer configuration: model registry, viewer attributes and QR codes")
            .subcommand_required(false)
            .subcommand(sub("help").about("Display this help message"))
            .subcommand(
                sub("init")
                    .about("Write a starter model store and page config")
                    .arg(
                        clap::Arg::new("force")
                            .long("force")
                            .help("Overwrite existing files")
                            .action(ArgAction::SetTrue),
                    ),
            )
            .subcommand(sub("list").about("List models"))
            .subcommand(sub("show").about("Show the effective configuration as JSON").arg(id_arg()))
            .subcommand(
                sub("attrs")
                    .about("Show viewer attributes for a model")
                    .arg(id_arg())
                    .arg(
                        clap::Arg::new("json")
                            .long("json")
                            .help("Print as a JSON object instead of an HTML attribute list")
                            .action(ArgAction::SetTrue),
                    ),
            )
            .subcommand(sub("url").about("Print the model page URL").arg(id_arg()))
            .subcommand(build_add_model_subcommand())
            .subcommand(qr_args(
                sub("generate-qr")
                    .about("Generate QR code images and a preview page for a URL")
                    .arg(clap::Arg::new("url").value_name("url").required(true)),
            ))
            .subcommand(qr_args(
                sub("qr")
                    .about("Generate a QR code for a model page")
                    .arg(id_arg()),
            ))
            .subcommand(sub("page-config").about("Show the page config projection as JSON"))
            .subcommand(build_scale_subcommand()),
    )
}

fn qr_options(m: &clap::ArgMatches) -> QrOptions {
    let mut options = QrOptions::default();
    if let Some(&format) = m.get_one::<QrFormat>("format") {
        options.format = format;
    }
    if let Some(&width) = m.get_one::<u32>("width") {
        options.width = width;
    }
    if let Some(&margin) = m.get_one::<u32>("margin") {
        options.margin = margin;
    }
    if let Some(dark) = m.get_one::<String>("dark") {
        options.dark = dark.clone();
    }
    if let Some(light) = m.get_one::<String>("light") {
        options.light = light.clone();
    }
    if let Some(&ec) = m.get_one::<ErrorCorrection>("ec") {
        options.error_correction = ec;
    }
    options
}

fn add_model_args(m: &clap::ArgMatches) -> AddModelArgs {
    let text = |name: &str| m.get_one::<String>(name).cloned();
    let inputs = RecordInputs {
        id: text("id").unwrap_or_default(),
        name: text("name").unwrap_or_default(),
        description: text("description").unwrap_or_default(),
        client: text("client").unwrap_or_default(),
        src: text("src").unwrap_or_default(),
        poster: text("poster"),
        scale: text("scale").map(|s| ScaleChoice::parse(&s)).unwrap_or_default(),
        placement: text("placement"),
        project_date: text("date"),
        project_type: text("type"),
        project_status: text("status"),
        primary_color: text("color"),
        background_color: None,
        theme_title: None,
    };
    AddModelArgs {
        inputs,
        assume_yes: m.get_flag("yes"),
    }
}

fn scale_request(m: &clap::ArgMatches) -> ScaleRequest {
    if let Some(&v) = m.get_one::<f64>("meters") {
        ScaleRequest::Meters(v)
    } else if let Some(&v) = m.get_one::<f64>("centimeters") {
        ScaleRequest::Centimeters(v)
    } else if let Some(&v) = m.get_one::<f64>("feet") {
        ScaleRequest::Feet(v)
    } else if let Some(p) = m.get_one::<String>("preset") {
        ScaleRequest::Preset(p.clone())
    } else {
        ScaleRequest::ListPresets
    }
}

fn id_of(m: &clap::ArgMatches) -> String {
    m.get_one::<String>("id").cloned().unwrap_or_default()
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let command = match matches.subcommand() {
        None | Some(("help", _)) => Command::Help,
        Some(("init", m)) => Command::Init {
            force: m.get_flag("force"),
        },
        Some(("list", _)) => Command::List,
        Some(("show", m)) => Command::Show { id: id_of(m) },
        Some(("attrs", m)) => Command::Attrs {
            id: id_of(m),
            json: m.get_flag("json"),
        },
        Some(("url", m)) => Command::Url { id: id_of(m) },
        Some(("add-model", m)) => Command::AddModel(add_model_args(m)),
        Some(("generate-qr", m)) => Command::GenerateQr {
            url: m.get_one::<String>("url").cloned().unwrap_or_default(),
            output: m.get_one::<PathBuf>("output").cloned(),
            options: qr_options(m),
        },
        Some(("qr", m)) => Command::Qr {
            id: id_of(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            options: qr_options(m),
        },
        Some(("page-config", _)) => Command::PageConfig,
        Some(("scale", m)) => Command::Scale(scale_request(m)),
        Some(_) => Command::Help,
    };

    Config {
        help: matches.get_flag("help") || matches!(command, Command::Help),
        verbose: matches.get_flag("verbose"),
        home_dir: matches.get_one::<String>("home-dir").cloned(),
        models: matches.get_one::<PathBuf>("models").cloned(),
        base_url: matches.get_one::<String>("base-url").cloned(),
        command,
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_args_from(std::env::args_os())
}

pub fn parse_args_from<I, T>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string().trim_end().to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "arview", &mut std::io::stdout());
}

/// Config を Command に変換する（-h はサブコマンドより優先）
pub fn config_to_command(config: &Config) -> Command {
    if config.help {
        return Command::Help;
    }
    config.command.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::domain::ScalePreset;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["arview"];
        argv.extend_from_slice(args);
        match parse_args_from(argv).unwrap() {
            ParseOutcome::Config(c) => c,
            ParseOutcome::GenerateCompletion(_) => panic!("unexpected completion"),
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.help);
        assert_eq!(config.home_dir, None);
        assert_eq!(config.command, Command::Help);
    }

    #[test]
    fn test_no_subcommand_is_help() {
        let config = parse(&[]);
        assert_eq!(config_to_command(&config), Command::Help);
    }

    #[test]
    fn test_help_flag_wins() {
        let config = parse(&["list", "-h"]);
        assert_eq!(config_to_command(&config), Command::Help);
    }

    #[test]
    fn test_global_options() {
        let config = parse(&["-v", "-d", "/tmp/h", "list", "--models", "m.json", "--base-url", "https://x/"]);
        assert!(config.verbose);
        assert_eq!(config.home_dir.as_deref(), Some("/tmp/h"));
        assert_eq!(config.models, Some(PathBuf::from("m.json")));
        assert_eq!(config.base_url.as_deref(), Some("https://x/"));
        assert_eq!(config.command, Command::List);
        let opts = config.wiring_options();
        assert!(opts.verbose);
        assert_eq!(opts.models_path, Some(PathBuf::from("m.json")));
    }

    #[test]
    fn test_generate_qr_with_output_and_options() {
        let config = parse(&[
            "generate-qr",
            "https://example.com/model.html?id=chair",
            "out/chair.png",
            "--width",
            "256",
            "--ec",
            "m",
            "--dark",
            "#112233",
        ]);
        match config.command {
            Command::GenerateQr { url, output, options } => {
                assert_eq!(url, "https://example.com/model.html?id=chair");
                assert_eq!(output, Some(PathBuf::from("out/chair.png")));
                assert_eq!(options.width, 256);
                assert_eq!(options.error_correction, ErrorCorrection::M);
                assert_eq!(options.dark, "#112233");
                assert_eq!(options.margin, QrOptions::default().margin);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_generate_qr_requires_url() {
        let err = parse_args_from(["arview", "generate-qr"]).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_out_of_range_qr_size_is_usage_error() {
        let err = parse_args_from(["arview", "generate-qr", "https://x/", "--margin", "1000"]).unwrap_err();
        assert_eq!(err.exit_code(), 64);
        let err = parse_args_from(["arview", "qr", "chair", "--width", "100000"]).unwrap_err();
        assert_eq!(err.exit_code(), 64);
        let err = parse_args_from(["arview", "generate-qr", "https://x/", "--width", "0"]).unwrap_err();
        assert!(err.is_usage());
        let config = parse(&["generate-qr", "https://x/", "--margin", "64", "--width", "4096"]);
        match config.command {
            Command::GenerateQr { options, .. } => {
                assert_eq!(options.margin, MAX_QR_MARGIN);
                assert_eq!(options.width, MAX_QR_WIDTH);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_ec_is_usage_error() {
        let err = parse_args_from(["arview", "generate-qr", "https://x/", "--ec", "Z"]).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_add_model_flags() {
        let config = parse(&[
            "add-model", "--id", "chair", "--src", "chair.glb", "--scale", "architectural", "--placement", "wall",
            "--yes",
        ]);
        match config.command {
            Command::AddModel(args) => {
                assert!(args.assume_yes);
                assert_eq!(args.inputs.id, "chair");
                assert_eq!(args.inputs.src, "chair.glb");
                assert_eq!(args.inputs.scale, ScaleChoice::Preset(ScalePreset::Architectural));
                assert_eq!(args.inputs.placement.as_deref(), Some("wall"));
                assert_eq!(args.inputs.poster, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_scale_requests() {
        assert_eq!(parse(&["scale", "--feet", "2"]).command, Command::Scale(ScaleRequest::Feet(2.0)));
        assert_eq!(
            parse(&["scale", "--preset", "building"]).command,
            Command::Scale(ScaleRequest::Preset("building".to_string()))
        );
        assert_eq!(parse(&["scale"]).command, Command::Scale(ScaleRequest::ListPresets));
        assert!(parse_args_from(["arview", "scale", "--meters", "1", "--feet", "1"]).is_err());
    }

    #[test]
    fn test_attrs_and_url() {
        assert_eq!(
            parse(&["attrs", "chair", "--json"]).command,
            Command::Attrs {
                id: "chair".to_string(),
                json: true
            }
        );
        assert_eq!(parse(&["url", "chair"]).command, Command::Url { id: "chair".to_string() });
        assert!(parse_args_from(["arview", "show"]).is_err());
    }

    #[test]
    fn test_generate_completion() {
        match parse_args_from(["arview", "--generate", "bash"]).unwrap() {
            ParseOutcome::GenerateCompletion(shell) => assert_eq!(shell, Shell::Bash),
            ParseOutcome::Config(_) => panic!("expected completion"),
        }
    }
}
