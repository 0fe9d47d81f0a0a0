//! Windowed, grouped aggregation of run records

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use super::types::{JobSummaryRow, RunRecord, RunnerUsage, SummaryRow};
use crate::client::models::WorkflowJob;
use crate::fetch::TimeWindow;

/// Label used for jobs that report no runner labels.
pub const UNKNOWN_LABEL: &str = "(unknown)";

/// Conclusions counted as failures (compared case-insensitively).
const FAILED_CONCLUSIONS: &[&str] = &[
    "failure",
    "failed",
    "cancelled",
    "timed_out",
    "action_required",
    "stale",
];

/// Whether a run (or job) counts as failed.
///
/// An empty conclusion means the run hasn't concluded; then only a `failure`
/// status counts.
pub fn is_failure(conclusion: &str, status: &str) -> bool {
    if conclusion.is_empty() {
        return status.eq_ignore_ascii_case("failure");
    }
    FAILED_CONCLUSIONS
        .iter()
        .any(|c| conclusion.eq_ignore_ascii_case(c))
}

/// Running totals for one group.
#[derive(Default)]
struct Tally {
    runs: usize,
    failed: usize,
    total: Duration,
    runners: HashMap<String, (usize, Duration)>,
}

impl Tally {
    fn count(&mut self, failed: bool, duration: Duration) {
        self.runs += 1;
        if failed {
            self.failed += 1;
        }
        self.total += duration;
    }

    /// Attribute a job's time to each of its labels, once per label.
    fn add_runner_usage(&mut self, job: &WorkflowJob) {
        let duration = job.duration();
        if duration <= Duration::zero() {
            return;
        }

        let labels: Vec<&str> = if job.labels.is_empty() {
            vec![UNKNOWN_LABEL]
        } else {
            job.labels
                .iter()
                .map(|l| match l.trim() {
                    "" => UNKNOWN_LABEL,
                    trimmed => trimmed,
                })
                .collect()
        };

        let mut seen = HashSet::new();
        for label in labels {
            if !seen.insert(label) {
                continue;
            }
            let entry = self
                .runners
                .entry(label.to_string())
                .or_insert((0, Duration::zero()));
            entry.0 += 1;
            entry.1 += duration;
        }
    }

    fn failure_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.failed as f64 / self.runs as f64
    }

    fn average(&self) -> Duration {
        if self.runs == 0 {
            return Duration::zero();
        }
        let runs = self.runs as i64;
        match self.total.num_nanoseconds() {
            Some(nanos) => Duration::nanoseconds(nanos / runs),
            None => Duration::milliseconds(self.total.num_milliseconds() / runs),
        }
    }

    /// Runner usage ranked by total time, then label.
    fn runner_summary(&self) -> Vec<RunnerUsage> {
        let mut usage: Vec<RunnerUsage> = self
            .runners
            .iter()
            .map(|(label, (runs, duration))| RunnerUsage {
                label: label.clone(),
                runs: *runs,
                duration: *duration,
            })
            .collect();
        usage.sort_by(|a, b| {
            b.duration
                .cmp(&a.duration)
                .then_with(|| a.label.cmp(&b.label))
        });
        usage
    }
}

struct WorkflowGroup {
    name: String,
    id: i64,
    tally: Tally,
    jobs: HashMap<String, Tally>,
}

/// Aggregate the records whose anchor time falls in `[from, to]`.
///
/// Rows are grouped by workflow ID and sorted by workflow name; job rows
/// within a workflow are sorted by job name. The result doesn't depend on
/// the order of `records`.
pub fn aggregate(records: &[RunRecord], from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<SummaryRow> {
    let window = TimeWindow::new(from, to);
    let mut groups: HashMap<i64, WorkflowGroup> = HashMap::new();

    for record in records.iter().filter(|r| window.contains(r.anchor_time())) {

        let group = groups
            .entry(record.workflow.id)
            .or_insert_with(|| WorkflowGroup {
                name: record.workflow.name.clone(),
                id: record.workflow.id,
                tally: Tally::default(),
                jobs: HashMap::new(),
            });

        let run = &record.run;
        group
            .tally
            .count(is_failure(&run.conclusion, &run.status), run.duration);

        for job in &record.jobs {
            group.tally.add_runner_usage(job);

            let job_tally = group.jobs.entry(job.name.clone()).or_default();
            job_tally.count(is_failure(&job.conclusion, &job.status), job.duration());
            job_tally.add_runner_usage(job);
        }
    }

    let mut rows: Vec<SummaryRow> = groups.into_values().map(summarize).collect();
    rows.sort_by(|a, b| {
        a.workflow
            .cmp(&b.workflow)
            .then_with(|| a.workflow_id.cmp(&b.workflow_id))
    });
    rows
}

fn summarize(group: WorkflowGroup) -> SummaryRow {
    let mut jobs: Vec<JobSummaryRow> = group
        .jobs
        .iter()
        .map(|(name, tally)| JobSummaryRow {
            job: name.clone(),
            runs: tally.runs,
            failed: tally.failed,
            failure_rate: tally.failure_rate(),
            avg_duration: tally.average(),
            total_duration: tally.total,
            runner_summary: tally.runner_summary(),
        })
        .collect();
    jobs.sort_by(|a, b| a.job.cmp(&b.job));

    let tally = &group.tally;
    SummaryRow {
        workflow: group.name,
        workflow_id: group.id,
        runs: tally.runs,
        failed: tally.failed,
        failure_rate: tally.failure_rate(),
        avg_duration: tally.average(),
        total_duration: tally.total,
        runner_summary: tally.runner_summary(),
        jobs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{Workflow, WorkflowRun};
    use chrono::TimeZone;

    fn t(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap()
    }

    fn workflow(id: i64, name: &str) -> Workflow {
        Workflow {
            id,
            name: name.to_string(),
            path: format!(".github/workflows/{}.yml", name),
            state: "active".to_string(),
        }
    }

    fn run(id: i64, start: DateTime<Utc>, minutes: i64, conclusion: &str) -> WorkflowRun {
        WorkflowRun {
            id,
            workflow_id: 0,
            name: String::new(),
            event: "push".to_string(),
            status: "completed".to_string(),
            conclusion: conclusion.to_string(),
            created_at: start,
            run_started_at: Some(start),
            updated_at: start + Duration::minutes(minutes),
            run_number: id as u64,
            run_attempt: 1,
            duration: Duration::minutes(minutes),
            head_branch: "main".to_string(),
        }
    }

    fn job(name: &str, minutes: i64, labels: &[&str]) -> WorkflowJob {
        let start = t(10, 0);
        WorkflowJob {
            name: name.to_string(),
            status: "completed".to_string(),
            conclusion: "success".to_string(),
            started_at: Some(start),
            completed_at: Some(start + Duration::minutes(minutes)),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            ..Default::default()
        }
    }

    fn record(wf: &Workflow, run: WorkflowRun, jobs: Vec<WorkflowJob>) -> RunRecord {
        RunRecord {
            workflow: wf.clone(),
            run,
            jobs,
        }
    }

    fn scenario() -> Vec<RunRecord> {
        let build = workflow(1, "build");
        let test = workflow(2, "test");
        vec![
            record(&test, run(3, t(12, 0), 120, "success"), vec![]),
            record(&build, run(1, t(10, 0), 30, "success"), vec![]),
            record(&build, run(2, t(11, 0), 60, "failure"), vec![]),
        ]
    }

    #[test]
    fn test_build_and_test_summary() {
        let rows = aggregate(&scenario(), t(1, 0), t(31, 0));

        assert_eq!(rows.len(), 2);
        let build = &rows[0];
        assert_eq!(build.workflow, "build");
        assert_eq!(build.runs, 2);
        assert_eq!(build.failed, 1);
        assert_eq!(build.failure_rate, 0.5);
        assert_eq!(build.avg_duration, Duration::minutes(45));
        assert_eq!(build.total_duration, Duration::minutes(90));

        let test = &rows[1];
        assert_eq!(test.workflow, "test");
        assert_eq!(test.runs, 1);
        assert_eq!(test.failed, 0);
        assert_eq!(test.failure_rate, 0.0);
        assert_eq!(test.avg_duration, Duration::minutes(120));
        assert_eq!(test.total_duration, Duration::minutes(120));
    }

    #[test]
    fn test_order_independent() {
        let records = scenario();
        let expected = aggregate(&records, t(1, 0), t(31, 0));

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(aggregate(&reversed, t(1, 0), t(31, 0)), expected);

        let mut rotated = records;
        rotated.rotate_left(1);
        assert_eq!(aggregate(&rotated, t(1, 0), t(31, 0)), expected);
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let wf = workflow(1, "build");
        let from = t(10, 0);
        let to = t(20, 0);
        let micro = Duration::microseconds(1);
        let records = vec![
            record(&wf, run(1, from, 1, "success"), vec![]),
            record(&wf, run(2, to, 1, "success"), vec![]),
            record(&wf, run(3, from - micro, 1, "success"), vec![]),
            record(&wf, run(4, to + micro, 1, "success"), vec![]),
        ];

        let rows = aggregate(&records, from, to);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].runs, 2);
    }

    #[test]
    fn test_created_at_used_without_start() {
        let wf = workflow(1, "build");
        let mut queued = run(1, t(5, 0), 0, "");
        queued.run_started_at = None;
        queued.created_at = t(15, 0);

        let rows = aggregate(&[record(&wf, queued, vec![])], t(10, 0), t(20, 0));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_no_records_in_window() {
        let rows = aggregate(&scenario(), t(20, 0), t(21, 0));
        assert!(rows.is_empty());
        assert!(aggregate(&[], t(1, 0), t(31, 0)).is_empty());
    }

    #[test]
    fn test_failure_classification() {
        let cases = [
            ("failure", "completed", true),
            ("cancelled", "completed", true),
            ("FAILED", "completed", true),
            ("timed_out", "completed", true),
            ("action_required", "completed", true),
            ("stale", "completed", true),
            ("", "failure", true),
            ("", "Failure", true),
            ("", "completed", false),
            ("", "in_progress", false),
            ("success", "completed", false),
            ("skipped", "completed", false),
            ("neutral", "failure", false),
        ];
        for (conclusion, status, expected) in cases {
            assert_eq!(
                is_failure(conclusion, status),
                expected,
                "conclusion={:?} status={:?}",
                conclusion,
                status
            );
        }
    }

    #[test]
    fn test_runner_ranking_by_duration() {
        let wf = workflow(1, "build");
        let records = vec![
            record(
                &wf,
                run(1, t(10, 0), 30, "success"),
                vec![job("a", 25, &["A"]), job("b", 20, &["B"])],
            ),
            record(&wf, run(2, t(11, 0), 30, "success"), vec![job("a", 25, &["A"])]),
        ];

        let rows = aggregate(&records, t(1, 0), t(31, 0));
        let usage = &rows[0].runner_summary;
        assert_eq!(usage.len(), 2);
        assert_eq!(usage[0].label, "A");
        assert_eq!(usage[0].runs, 2);
        assert_eq!(usage[0].duration, Duration::minutes(50));
        assert_eq!(usage[1].label, "B");
        assert_eq!(usage[1].runs, 1);
        assert_eq!(usage[1].duration, Duration::minutes(20));
    }

    #[test]
    fn test_runner_ties_broken_by_label() {
        let wf = workflow(1, "build");
        let records = vec![record(
            &wf,
            run(1, t(10, 0), 30, "success"),
            vec![job("x", 10, &["zeta"]), job("y", 10, &["alpha"]), job("z", 10, &["mid"])],
        )];

        let rows = aggregate(&records, t(1, 0), t(31, 0));
        let labels: Vec<_> = rows[0]
            .runner_summary
            .iter()
            .map(|u| u.label.as_str())
            .collect();
        assert_eq!(labels, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_labels_deduplicated_per_job_only() {
        let wf = workflow(1, "build");
        let records = vec![record(
            &wf,
            run(1, t(10, 0), 30, "success"),
            vec![
                job("a", 10, &["linux", " linux ", "x64"]),
                job("b", 5, &["linux"]),
            ],
        )];

        let rows = aggregate(&records, t(1, 0), t(31, 0));
        let linux = rows[0]
            .runner_summary
            .iter()
            .find(|u| u.label == "linux")
            .unwrap();
        assert_eq!(linux.runs, 2);
        assert_eq!(linux.duration, Duration::minutes(15));
    }

    #[test]
    fn test_unknown_label_placeholder() {
        let wf = workflow(1, "build");
        let records = vec![record(
            &wf,
            run(1, t(10, 0), 30, "success"),
            vec![job("a", 10, &[]), job("b", 5, &["  "])],
        )];

        let rows = aggregate(&records, t(1, 0), t(31, 0));
        assert_eq!(
            rows[0].runner_summary,
            vec![RunnerUsage {
                label: UNKNOWN_LABEL.to_string(),
                runs: 2,
                duration: Duration::minutes(15),
            }]
        );
    }

    #[test]
    fn test_zero_duration_jobs_skip_runner_usage() {
        let wf = workflow(1, "build");
        let mut unfinished = job("a", 10, &["linux"]);
        unfinished.completed_at = None;
        let records = vec![record(&wf, run(1, t(10, 0), 30, "success"), vec![unfinished])];

        let rows = aggregate(&records, t(1, 0), t(31, 0));
        assert!(rows[0].runner_summary.is_empty());
        assert_eq!(rows[0].runs, 1);
    }

    #[test]
    fn test_job_rows_grouped_by_name() {
        let wf = workflow(1, "build");
        let mut failed_test = job("test", 20, &["linux"]);
        failed_test.conclusion = "failure".to_string();
        let records = vec![
            record(
                &wf,
                run(1, t(10, 0), 30, "success"),
                vec![job("test", 10, &["linux"]), job("lint", 2, &["linux"])],
            ),
            record(&wf, run(2, t(11, 0), 30, "failure"), vec![failed_test]),
        ];

        let rows = aggregate(&records, t(1, 0), t(31, 0));
        let jobs = &rows[0].jobs;
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].job, "lint");
        assert_eq!(jobs[1].job, "test");
        assert_eq!(jobs[1].runs, 2);
        assert_eq!(jobs[1].failed, 1);
        assert_eq!(jobs[1].failure_rate, 0.5);
        assert_eq!(jobs[1].total_duration, Duration::minutes(30));
        assert_eq!(jobs[1].avg_duration, Duration::minutes(15));
        assert_eq!(jobs[1].runner_summary[0].runs, 2);
    }

    #[test]
    fn test_average_truncates() {
        let wf = workflow(1, "build");
        let mut records = Vec::new();
        for (id, secs) in [(1, 1), (2, 1), (3, 2)] {
            let mut r = run(id, t(10, 0), 0, "success");
            r.duration = Duration::seconds(secs);
            records.push(record(&wf, r, vec![]));
        }

        let rows = aggregate(&records, t(1, 0), t(31, 0));
        assert_eq!(rows[0].total_duration, Duration::seconds(4));
        assert_eq!(rows[0].avg_duration, Duration::nanoseconds(1_333_333_333));
    }

    #[test]
    fn test_groups_by_id_not_name() {
        let first = workflow(1, "ci");
        let second = workflow(2, "ci");
        let records = vec![
            record(&second, run(2, t(10, 0), 10, "success"), vec![]),
            record(&first, run(1, t(10, 0), 10, "success"), vec![]),
        ];

        let rows = aggregate(&records, t(1, 0), t(31, 0));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].workflow_id, 1);
        assert_eq!(rows[1].workflow_id, 2);
    }
}
