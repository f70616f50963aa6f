//! Appends the candidate files into one document and writes it out

use std::path::Path;
use crate::pdf::MergeWriter;
use crate::report::{MergeReport, MergeStage, RULE};
use crate::resolver::CandidateFile;

/// Merge `candidates`, in the given order, into `output_path`
///
/// Files that cannot be appended are skipped with a warning. When nothing
/// could be appended no file is written. A failed write ends the report in
/// [`MergeStage::Failed`] instead of returning an error; the report is the
/// only result.
pub fn execute(candidates: &[CandidateFile], output_path: &Path) -> MergeReport {
    let mut report = MergeReport::new();
    execute_into(&mut report, candidates, output_path);
    report
}

/// Run the merge step, appending to an existing report
pub(crate) fn execute_into(
    report: &mut MergeReport,
    candidates: &[CandidateFile],
    output_path: &Path,
) {
    report.enter(MergeStage::Merging);
    report.total_count = candidates.len();
    report.blank();
    report.push("Starting merge process...");

    let mut writer = MergeWriter::new();
    append_all(report, &mut writer, candidates);
    let stage = write_output(report, &mut writer, output_path);
    writer.close();

    report.finish(stage);
}

fn append_all(report: &mut MergeReport, writer: &mut MergeWriter, candidates: &[CandidateFile]) {
    for candidate in candidates {
        report.push(format!(" - Adding: {}", candidate.base_name));

        match writer.append(&candidate.absolute_path) {
            Ok(pages) => {
                report.added_count += 1;
                log::info!("Appended {} ({} pages)", candidate.base_name, pages);
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", candidate.absolute_path.display(), e);
                report.push(format!(
                    "   ! WARNING: Cannot add '{}'. Error: {}",
                    candidate.base_name, e
                ));
                report.push("   ! This file will be skipped.");
            }
        }
    }
}

fn write_output(report: &mut MergeReport, writer: &mut MergeWriter, output_path: &Path) -> MergeStage {
    if report.added_count == 0 || writer.page_count() == 0 {
        report.blank();
        report.push(
            "No PDF files were successfully added or processed. Output file will not be created.",
        );
        return MergeStage::CompletedEmpty;
    }

    let pages = writer.page_count();
    match writer.write_to(output_path) {
        Ok(()) => {
            log::info!("Wrote {} pages to {}", pages, output_path.display());
            report.push(RULE);
            report.blank();
            report.push("Merge process SUCCESSFULLY completed!");
            report.push(format!("Merged PDF saved as: '{}'", output_path.display()));
            report.push(format!(
                "Total {} of {} files successfully merged.",
                report.added_count, report.total_count
            ));
            report.output_path = Some(output_path.to_path_buf());
            MergeStage::Completed
        }
        Err(e) => {
            log::error!("Failed to write {}: {}", output_path.display(), e);
            report.blank();
            report.push(format!("!!! ERROR during merge or save process: {e}"));
            report.push(format!(
                "{} of {} files were appended before the error; nothing was saved.",
                report.added_count, report.total_count
            ));
            MergeStage::Failed
        }
    }
}
