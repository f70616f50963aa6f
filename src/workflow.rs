//! One complete merge: validate, list, merge, report

use crate::executor::execute_into;
use crate::report::{MergeReport, MergeStage, RULE};
use crate::request::MergeRequest;
use crate::resolver::{enumerate, validate, Resolution, ResolvedTarget};

/// Merge every PDF in the request's input folder into its output file
///
/// Never fails: every outcome, including invalid form values, is described
/// by the returned report.
///
/// # Example
///
/// ```no_run
/// use pdf_folder_merge::{merge_folder, MergeRequest};
///
/// let request = MergeRequest::new("handouts", "out", "all-handouts");
/// let report = merge_folder(&request);
/// println!("{report}");
/// ```
pub fn merge_folder(request: &MergeRequest) -> MergeReport {
    let mut report = MergeReport::new();

    report.enter(MergeStage::Validating);
    let target = match validate(request) {
        Ok(target) => target,
        Err(e) => {
            log::warn!("Rejected merge request: {e}");
            return MergeReport::failed(e);
        }
    };
    describe_target(&mut report, &target);

    report.enter(MergeStage::Enumerating);
    report.push("Searching for PDF files...");
    let resolution = match enumerate(target) {
        Ok(resolution) => resolution,
        Err(e) => {
            log::error!("{e}");
            report.blank();
            report.push(e.to_string());
            report.finish(MergeStage::Failed);
            return report;
        }
    };
    describe_resolution(&mut report, &resolution);

    if resolution.candidates.is_empty() {
        report.finish(MergeStage::CompletedEmpty);
        return report;
    }

    execute_into(&mut report, &resolution.candidates, &resolution.target.output_path);
    report
}

fn describe_target(report: &mut MergeReport, target: &ResolvedTarget) {
    report.push(format!("Input folder: {}", target.input_folder.display()));
    report.push(format!("Output folder: {}", target.output_folder.display()));
    report.push(format!("Output file: {}", target.file_name));
    report.push(RULE);
}

fn describe_resolution(report: &mut MergeReport, resolution: &Resolution) {
    for skipped in &resolution.skipped {
        let name = skipped
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        report.push(format!(" - Skipping existing output file: {name}"));
    }

    report.blank();
    if resolution.candidates.is_empty() {
        report.push("No PDF files found for merging in the input folder.");
        return;
    }

    report.push("Found PDF files for merging (in order):");
    for candidate in &resolution.candidates {
        report.push(format!(" - {}", candidate.base_name));
    }
}
