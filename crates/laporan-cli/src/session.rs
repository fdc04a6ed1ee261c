//! Interactive editing session: the terminal form over one open draft.

use std::io::{BufRead, Write};

use anyhow::Context;
use laporan_ai::{Polisher, TextGenerator};
use laporan_core::{Editor, NarrativeField, PolishOutcome, ReportField};
use laporan_store::{DraftStore, KeyValueStore};
use tracing::info;

use crate::display;

pub const CONFIRM_CLEAR: &str = "Adakah anda pasti mahu memadam semua data? [y/N] ";

const HELP: &str = "\
Arahan:
  show                          papar semua medan
  set <medan> <nilai>           tukar satu medan (\\n untuk baris baharu)
  polish <chronology|actions|all>
                                murnikan teks naratif dengan AI
  save                          simpan draf
  clear                         padam semua data
  preview                       papar laporan untuk dicetak
  fields                        senarai nama medan
  help                          papar bantuan ini
  quit                          keluar
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Set(ReportField, String),
    Polish(Vec<NarrativeField>),
    Save,
    Clear,
    Preview,
    Fields,
    Help,
    Quit,
}

/// Parse one input line. `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((v, r)) => (v, r.trim_start()),
        None => (line.trim_end(), ""),
    };

    let cmd = match verb {
        "show" => Command::Show,
        "set" => {
            let (path, value) = match rest.split_once(char::is_whitespace) {
                Some((p, v)) => (p, v.trim_start()),
                None => (rest, ""),
            };
            if path.is_empty() {
                return Err("usage: set <medan> <nilai>".into());
            }
            let field: ReportField = path.parse().map_err(|e| format!("{e}"))?;
            Command::Set(field, value.replace("\\n", "\n"))
        }
        "polish" => match rest.trim() {
            "all" => Command::Polish(NarrativeField::ALL.to_vec()),
            "" => return Err("usage: polish <chronology|actions|all>".into()),
            name => {
                let field: NarrativeField = name.parse().map_err(|e| format!("{e}"))?;
                Command::Polish(vec![field])
            }
        },
        "save" => Command::Save,
        "clear" => Command::Clear,
        "preview" => Command::Preview,
        "fields" => Command::Fields,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("arahan tidak dikenali: {other} (cuba `help`)")),
    };
    Ok(Some(cmd))
}

pub struct Session<S, G> {
    editor: Editor,
    drafts: DraftStore<S>,
    polisher: Option<Polisher<G>>,
}

impl<S: KeyValueStore, G: TextGenerator> Session<S, G> {
    /// Open a session on the saved draft, or on a fresh report if there is none.
    ///
    /// Either way the editor starts clean: it holds exactly what is stored.
    pub fn open(drafts: DraftStore<S>, polisher: Option<Polisher<G>>) -> Self {
        let mut editor = Editor::default();
        if let Some(saved) = drafts.load() {
            info!("resuming saved draft");
            editor.replace(saved);
        }
        editor.mark_saved();
        Self {
            editor,
            drafts,
            polisher,
        }
    }

    #[cfg(test)]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Read commands from `input` until `quit` or end of input.
    pub async fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> anyhow::Result<()> {
        writeln!(out, "Laporan Awal Kes PPD: taip `help` untuk senarai arahan.")?;
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                break;
            };
            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(cmd)) => self.execute(cmd, input, out).await?,
                Err(msg) => writeln!(out, "{msg}")?,
            }
        }
        if self.editor.is_dirty() {
            writeln!(out, "Amaran: perubahan terakhir belum disimpan.")?;
        }
        Ok(())
    }

    async fn execute<R: BufRead, W: Write>(
        &mut self,
        cmd: Command,
        input: &mut R,
        out: &mut W,
    ) -> anyhow::Result<()> {
        match cmd {
            Command::Show => {
                write!(out, "{}", display::render_field_list(self.editor.report()))?
            }
            Command::Set(field, value) => {
                self.editor.set(field, value);
                writeln!(out, "{field} dikemaskini.")?;
            }
            Command::Polish(fields) => self.polish(&fields, out).await?,
            Command::Save => {
                self.drafts
                    .save(self.editor.report())
                    .context("saving draft")?;
                self.editor.mark_saved();
                writeln!(out, "Draf disimpan secara lokal.")?;
            }
            Command::Clear => {
                write!(out, "{CONFIRM_CLEAR}")?;
                out.flush()?;
                if confirmed(input)? {
                    self.editor.reset();
                    self.drafts.clear();
                    self.editor.mark_saved();
                    writeln!(out, "Semua data dipadam.")?;
                } else {
                    writeln!(out, "Dibatalkan.")?;
                }
            }
            Command::Preview => {
                let now = chrono::Local::now().naive_local();
                write!(out, "{}", display::render_print_view(self.editor.report(), now))?;
            }
            Command::Fields => {
                for field in ReportField::all() {
                    writeln!(out, "  {field}")?;
                }
            }
            Command::Help => write!(out, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Polish each field concurrently, then apply the results in field order.
    async fn polish<W: Write>(
        &mut self,
        fields: &[NarrativeField],
        out: &mut W,
    ) -> anyhow::Result<()> {
        let Some(polisher) = &self.polisher else {
            writeln!(out, "AI Polish tidak tersedia: GEMINI_API_KEY tidak ditetapkan.")?;
            return Ok(());
        };

        let mut tickets = Vec::new();
        for &field in fields {
            match self.editor.begin_polish(field) {
                Some(ticket) => tickets.push(ticket),
                None => writeln!(out, "{field}: permintaan sedang berjalan.")?,
            }
        }

        let results =
            futures::future::join_all(tickets.iter().map(|t| polisher.polish(t.text(), t.field())))
                .await;

        for (ticket, polished) in tickets.into_iter().zip(results) {
            let field = ticket.field();
            let changed = polished != ticket.text();
            match self.editor.finish_polish(ticket, polished) {
                PolishOutcome::Applied if changed => {
                    writeln!(out, "{}: dimurnikan.", field.label())?
                }
                PolishOutcome::Applied => writeln!(out, "{}: tiada perubahan.", field.label())?,
                PolishOutcome::Discarded => writeln!(
                    out,
                    "{}: keputusan diabaikan (teks telah berubah).",
                    field.label()
                )?,
            }
        }
        Ok(())
    }
}

fn read_line<R: BufRead>(input: &mut R) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("reading input")?;
    Ok(if n == 0 { None } else { Some(line) })
}

/// Read a y/N answer. Anything but `y`/`ya`/`yes` declines.
pub fn confirmed<R: BufRead>(input: &mut R) -> anyhow::Result<bool> {
    let answer = read_line(input)?.unwrap_or_default();
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "ya" | "yes"
    ))
}
