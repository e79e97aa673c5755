//! add-model の対話入力（標準入力から読み、質問は stderr に出す）
//!
//! usecase は RecordPrompt trait 経由でのみ利用する。

use crate::ports::outbound::RecordPrompt;
use common::builder::{
    RecordInputs, ScaleChoice, DEFAULT_PRIMARY_COLOR, DEFAULT_PROJECT_DATE, DEFAULT_PROJECT_STATUS,
    DEFAULT_PROJECT_TYPE,
};
use common::domain::ScalePreset;
use common::error::Error;
use std::io::{self, BufRead, Write};

/// 標準入出力で問い合わせる RecordPrompt
#[derive(Debug, Clone, Default)]
pub struct CliRecordPrompt;

impl RecordPrompt for CliRecordPrompt {
    fn collect(&self, seed: &RecordInputs) -> Result<Option<RecordInputs>, Error> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stderr();
        collect_from(&mut input, &mut output, seed)
    }
}

const CUSTOM_CHOICE: usize = ScalePreset::ALL.len() + 1;

struct Session<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    /// 1 行読む。EOF なら None。
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<Option<String>, Error> {
        let written = match default {
            Some(d) if !d.is_empty() => write!(self.output, "{} [{}]: ", question, d),
            _ => write!(self.output, "{}: ", question),
        };
        written
            .and_then(|_| self.output.flush())
            .map_err(|e| Error::io_msg(e.to_string()))?;

        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;
        if n == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(Some(default.unwrap_or("").to_string()));
        }
        Ok(Some(answer.to_string()))
    }

    /// 空でない答えが来るまで聞き直す
    fn ask_required(&mut self, question: &str) -> Result<Option<String>, Error> {
        loop {
            match self.ask(question, None)? {
                None => return Ok(None),
                Some(a) if !a.is_empty() => return Ok(Some(a)),
                Some(_) => self.say(&format!("  {} is required.", question))?,
            }
        }
    }

    fn say(&mut self, text: &str) -> Result<(), Error> {
        writeln!(self.output, "{}", text).map_err(|e| Error::io_msg(e.to_string()))
    }

    fn ask_scale(&mut self) -> Result<Option<ScaleChoice>, Error> {
        self.say("Scale preset:")?;
        for (i, preset) in ScalePreset::ALL.iter().enumerate() {
            self.say(&format!("  {}) {:<14} {} ({})", i + 1, preset.name(), preset.description(), preset.scale()))?;
        }
        self.say(&format!("  {}) custom", CUSTOM_CHOICE))?;
        loop {
            let Some(answer) = self.ask("Choose", Some("2"))? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(n) if (1..=ScalePreset::ALL.len()).contains(&n) => {
                    return Ok(Some(ScaleChoice::Preset(ScalePreset::ALL[n - 1])));
                }
                Ok(n) if n == CUSTOM_CHOICE => {
                    loop {
                        let Some(custom) = self.ask_required("Custom scale (x y z)")? else {
                            return Ok(None);
                        };
                        let choice = ScaleChoice::Custom(custom);
                        match choice.resolve() {
                            Ok(_) => return Ok(Some(choice)),
                            Err(e) => self.say(&format!("  {}", e))?,
                        }
                    }
                }
                _ => self.say(&format!("  Enter a number between 1 and {}.", CUSTOM_CHOICE))?,
            }
        }
    }
}

fn keep_or(seed: &str, ask: impl FnOnce() -> Result<Option<String>, Error>) -> Result<Option<String>, Error> {
    if seed.trim().is_empty() {
        ask()
    } else {
        Ok(Some(seed.to_string()))
    }
}

/// 入出力を差し替え可能な本体（テストでは Cursor を渡す）
pub fn collect_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    seed: &RecordInputs,
) -> Result<Option<RecordInputs>, Error> {
    let mut s = Session { input, output };
    let mut out = seed.clone();

    macro_rules! answer {
        ($e:expr) => {
            match $e? {
                Some(v) => v,
                None => return Ok(None),
            }
        };
    }

    s.say("Add a new model (Ctrl-D to cancel)")?;
    out.id = answer!(keep_or(&seed.id, || s.ask_required("Model ID (lowercase-with-hyphens)")));
    let id_default = out.id.clone();
    out.name = answer!(keep_or(&seed.name, || s.ask("Display name", Some(&id_default))));
    out.description = answer!(keep_or(&seed.description, || s.ask("Description", None)));
    out.client = answer!(keep_or(&seed.client, || s.ask("Client", None)));
    out.src = answer!(keep_or(&seed.src, || s.ask_required("Model file name (e.g. scene.glb)")));
    if seed.poster.is_none() {
        let poster = answer!(s.ask("Poster image file name (blank for none)", None));
        out.poster = Some(poster).filter(|p| !p.is_empty());
    }
    if seed.scale == ScaleChoice::default() {
        out.scale = answer!(s.ask_scale());
    }
    if seed.placement.is_none() {
        out.placement = Some(answer!(s.ask("AR placement (floor/wall)", Some("floor"))));
    }
    if seed.project_date.is_none() {
        out.project_date = Some(answer!(s.ask("Project date", Some(DEFAULT_PROJECT_DATE))));
    }
    if seed.project_type.is_none() {
        out.project_type = Some(answer!(s.ask("Project type", Some(DEFAULT_PROJECT_TYPE))));
    }
    if seed.project_status.is_none() {
        out.project_status = Some(answer!(s.ask("Project status", Some(DEFAULT_PROJECT_STATUS))));
    }
    if seed.primary_color.is_none() {
        out.primary_color = Some(answer!(s.ask("Theme primary color", Some(DEFAULT_PRIMARY_COLOR))));
    }

    s.say("")?;
    s.say(&format!("  id:        {}", out.id))?;
    s.say(&format!("  name:      {}", out.name))?;
    s.say(&format!("  client:    {}", out.client))?;
    s.say(&format!("  src:       {}", out.src))?;
    s.say(&format!("  poster:    {}", out.poster.as_deref().unwrap_or("(none)")))?;
    let scale = match &out.scale {
        ScaleChoice::Preset(p) => format!("{} ({})", p.name(), p.scale()),
        ScaleChoice::Custom(c) => c.clone(),
    };
    s.say(&format!("  scale:     {}", scale))?;
    s.say(&format!("  placement: {}", out.placement.as_deref().unwrap_or("floor")))?;
    let confirm = answer!(s.ask("Add this model? [Y/n]", None));
    match confirm.to_lowercase().as_str() {
        "" | "y" | "yes" => Ok(Some(out)),
        _ => Ok(None),
    }
}
