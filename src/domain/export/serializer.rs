//! Projects a finished session record into export tables.
//!
//! Serialization is pure: the same record always yields the same tables, and
//! the export moment only appears in the file name.

use chrono::FixedOffset;

use crate::domain::foundation::Timestamp;
use crate::domain::session::{Phase, SessionRecord, TextField};

use super::{Cell, Table, TabularExport};

pub const SUMMARY_SHEET: &str = "Summary";
pub const REFLECTION_SHEET: &str = "Reflection";
pub const SURVEY_SHEET: &str = "Survey";

const FILE_STEM_PREFIX: &str = "writing_result_";

const SUMMARY_HEADERS: [&str; 16] = [
    "Name",
    "Student ID",
    "Class",
    "Brainstorming",
    "Pre-Test",
    "Model text",
    "Reflection notes",
    "Post-Test",
    "Brainstorm(sec)",
    "Pre-Test(sec)",
    "Reflection(sec)",
    "Post-Test(sec)",
    "Pre-Test(words)",
    "Post-Test(words)",
    "Pre-Test(chars)",
    "Post-Test(chars)",
];

const REFLECTION_HEADERS: [&str; 4] = ["Error", "Correction", "Code", "Explanation"];

const SURVEY_HEADERS: [&str; 2] = ["Question ID", "Answer"];

/// Builds the export tables for a record.
///
/// The summary sheet is always present. The reflection and survey sheets are
/// omitted when they would have no rows.
pub fn serialize(record: &SessionRecord) -> TabularExport {
    let mut export = TabularExport::new();
    export.push(summary_table(record));

    let reflection = reflection_table(record);
    if !reflection.is_empty() {
        export.push(reflection);
    }

    let survey = survey_table(record);
    if !survey.is_empty() {
        export.push(survey);
    }

    export
}

/// File name without extension, stamped with the export minute on the
/// wall clock at `offset`.
pub fn export_file_stem(exported_at: Timestamp, offset: FixedOffset) -> String {
    format!("{}{}", FILE_STEM_PREFIX, exported_at.compact_minute_stamp(offset))
}

fn summary_table(record: &SessionRecord) -> Table {
    let identity = record.identity();
    let elapsed = |phase: Phase| record.window(phase).map_or(0, |w| w.elapsed_secs());
    let pre_test = record.text_stats(TextField::PreTest);
    let post_test = record.text_stats(TextField::PostTest);

    let mut row = vec![
        Cell::from(identity.name.as_str()),
        Cell::from(identity.participant_id.as_str()),
        Cell::from(identity.cohort_label()),
    ];
    row.extend(TextField::all().iter().map(|f| Cell::from(record.text(*f))));
    row.extend([
        Cell::from(elapsed(Phase::Brainstorm)),
        Cell::from(elapsed(Phase::PreTest)),
        Cell::from(record.reflection_clock().elapsed_secs()),
        Cell::from(elapsed(Phase::PostTest)),
        Cell::from(pre_test.words),
        Cell::from(post_test.words),
        Cell::from(pre_test.chars),
        Cell::from(post_test.chars),
    ]);

    let mut table = Table::new(SUMMARY_SHEET, SUMMARY_HEADERS);
    table.push_row(row);
    table
}

fn reflection_table(record: &SessionRecord) -> Table {
    let mut table = Table::new(REFLECTION_SHEET, REFLECTION_HEADERS);
    for entry in record.reflection_entries() {
        table.push_row(vec![
            Cell::from(entry.error_text()),
            Cell::from(entry.correction_text()),
            Cell::from(entry.code().abbreviation()),
            Cell::from(entry.explanation()),
        ]);
    }
    table
}

fn survey_table(record: &SessionRecord) -> Table {
    let mut table = Table::new(SURVEY_SHEET, SURVEY_HEADERS);
    for (question, score) in record.survey().answered() {
        table.push_row(vec![Cell::from(question.id), Cell::from(score.value())]);
    }
    table
}
