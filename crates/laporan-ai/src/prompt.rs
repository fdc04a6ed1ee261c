//! Prompt templates for narrative polishing.

use laporan_core::NarrativeField;

/// Model used for every polish request.
pub const MODEL: &str = "gemini-3-flash-preview";

// ── Prompt templates ──

const PERSONA: &str = "\
Anda adalah Pegawai Tadbir di Jabatan Pendidikan Negeri (JPN) Selangor.
Tugas anda adalah memurnikan (polish) teks laporan kes sekolah supaya lebih profesional, \
berstruktur, dan menggunakan Bahasa Melayu formal yang tepat.
Pastikan format senarai (1., 2., 3.) dikekalkan jika ada.
Jangan ubah fakta asal, hanya baiki tatabahasa dan kosa kata.";

/// System instruction for polishing `field`. Only the section label varies.
pub fn build_system_instruction(field: NarrativeField) -> String {
    format!(
        "{PERSONA}\nTeks yang diberikan adalah untuk bahagian: {label}.",
        label = field.label()
    )
}

pub fn build_user_prompt(text: &str) -> String {
    format!("Sila murnikan teks berikut:\n\n{text}")
}
