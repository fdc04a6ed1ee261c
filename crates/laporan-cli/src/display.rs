//! Text rendering of a case report: the editor field list and the printable page.

use std::fmt::Write;

use chrono::NaiveDateTime;
use laporan_core::{CaseReport, PersonField, ReportField, SignatureRole};

const PAGE_WIDTH: usize = 78;
const NO_CHRONOLOGY: &str = "Tiada keterangan disediakan.";
const NO_ACTIONS: &str = "Tiada maklumat tindakan disediakan.";

// ── Page section groupings ──

const CASE_INFO: &[(&str, ReportField)] = &[
    ("Nama Sekolah", ReportField::SchoolName),
    ("Kod Sekolah", ReportField::SchoolCode),
    ("Tarikh Kejadian", ReportField::IncidentDate),
    ("Alamat Sekolah", ReportField::SchoolAddress),
];

const INVOLVED: &[(&str, ReportField)] = &[
    ("Nama", ReportField::Person(PersonField::Name)),
    ("No. Kad Pengenalan", ReportField::Person(PersonField::IcNumber)),
    ("Kelas / Jawatan", ReportField::Person(PersonField::Position)),
];

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}

fn centred(out: &mut String, text: &str) {
    let pad = PAGE_WIDTH.saturating_sub(text.chars().count()) / 2;
    let _ = writeln!(out, "{:pad$}{text}", "");
}

fn rule(out: &mut String, ch: char) {
    let _ = writeln!(out, "{}", ch.to_string().repeat(PAGE_WIDTH));
}

/// One `label : value` row; continuation lines of a multi-line value are
/// indented under the value column.
fn row(out: &mut String, label: &str, value: &str) {
    let mut lines = or_dash(value).lines();
    let first = lines.next().unwrap_or("-");
    let _ = writeln!(out, "  {label:<22}: {first}");
    for line in lines {
        let _ = writeln!(out, "  {:<22}  {line}", "");
    }
}

fn section(out: &mut String, header: &str, rows: &[(&str, ReportField)], report: &CaseReport) {
    let _ = writeln!(out, "{}", header.to_uppercase());
    rule(out, '-');
    for &(label, field) in rows {
        row(out, label, report.get(field));
    }
    let _ = writeln!(out);
}

fn narrative(out: &mut String, header: &str, text: &str, empty: &str) {
    let _ = writeln!(out, "{}", header.to_uppercase());
    rule(out, '-');
    let body = if text.trim().is_empty() { empty } else { text };
    for line in body.lines() {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(out);
}

// ── Public API ──

/// Render the printable page as of `now`.
///
/// Blank values print as `-`. The preparer's date falls back to the render
/// date; the checker and verifier dates are left for handwriting.
pub fn render_print_view(report: &CaseReport, now: NaiveDateTime) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "SULIT");
    let _ = writeln!(out);
    centred(&mut out, "JPN SELANGOR");
    centred(&mut out, "PPD PETALING UTAMA");
    centred(&mut out, "LAPORAN AWAL KES");
    rule(&mut out, '=');
    let _ = writeln!(out);
    let _ = writeln!(out, "[ MAKLUMAN SEGERA ]");
    let _ = writeln!(out);

    row(&mut out, "TAJUK KES", &report.title);
    let _ = writeln!(out);

    section(&mut out, "Maklumat Kes", CASE_INFO, report);
    section(&mut out, "Maklumat Murid / Pegawai Terlibat", INVOLVED, report);
    narrative(&mut out, "Keterangan Ringkas (Kronologi Kes)", &report.chronology, NO_CHRONOLOGY);
    narrative(&mut out, "Tindakan Sekolah", &report.actions_taken, NO_ACTIONS);

    rule(&mut out, '=');
    for role in SignatureRole::CHAIN {
        let sig = report.signature(role);
        let date = match (sig.date.trim().is_empty(), role) {
            (false, _) => sig.date.clone(),
            (true, SignatureRole::Preparer) => now.format("%d/%m/%Y").to_string(),
            (true, _) => String::new(),
        };
        let _ = writeln!(out, "{}:", role.label());
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", ".".repeat(30));
        let _ = writeln!(out, "  Nama    : {}", sig.name);
        let _ = writeln!(out, "  Jawatan : {}", sig.position);
        let _ = writeln!(out, "  No H/P  : {}", sig.phone);
        let _ = writeln!(out, "  Tarikh  : {date}");
        let _ = writeln!(out);
    }
    rule(&mut out, '=');
    let _ = writeln!(
        out,
        "Laporan dijana secara digital pada {}",
        now.format("%d/%m/%Y %H:%M:%S")
    );

    out
}

/// Every field with its dotted path, for the editor.
pub fn render_field_list(report: &CaseReport) -> String {
    let mut out = String::new();
    for field in ReportField::all() {
        let path = field.path();
        let mut lines = report.get(field).lines();
        let _ = writeln!(out, "  {:<26} {}", path, lines.next().unwrap_or("-"));
        for line in lines {
            let _ = writeln!(out, "  {:<26} {line}", "");
        }
    }
    out
}
