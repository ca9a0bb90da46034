use crate::calendar::day_key;
use crate::model::Staff;
use crate::scheduler::{GenerationReport, SkipReason};

/// Permet de customiser le rendu du bilan (texte, mail, etc.).
pub trait SummaryRenderer {
    fn render(&self, staff: &[Staff], report: &GenerationReport) -> String;
}

/// Rendu texte simple du bilan de génération.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSummary;

impl SummaryRenderer for TextSummary {
    fn render(&self, staff: &[Staff], report: &GenerationReport) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{}\nAssigned shifts: {}\n",
            report.message, report.assigned_shifts
        ));

        if report.shortfalls.is_empty() {
            out.push_str("No staffing shortfall.\n");
        } else {
            out.push_str(&format!("Shortfalls ({}):\n", report.shortfalls.len()));
            for s in &report.shortfalls {
                out.push_str(&format!(
                    "  {} {} — {}/{} assigned\n",
                    day_key(s.date),
                    s.role,
                    s.assigned,
                    s.target
                ));
            }
        }

        for skip in &report.skipped_requests {
            let name = display_name(staff, skip);
            let reason = match skip.reason {
                SkipReason::Ineligible => "not eligible that day",
                SkipReason::OverCapacity => "shift does not fit",
            };
            out.push_str(&format!(
                "Request skipped: {} {} {} ({reason})\n",
                name,
                day_key(skip.date),
                skip.shift
            ));
        }

        out.push_str("Weekly hours:\n");
        for (id, weeks) in &report.weekly_hours {
            let name = staff
                .iter()
                .find(|s| &s.id == id)
                .map(|s| s.name.as_str())
                .unwrap_or_else(|| id.as_str());
            for (monday, hours) in weeks {
                out.push_str(&format!(
                    "  {name}: week of {} — {hours}h\n",
                    day_key(*monday)
                ));
            }
        }
        out
    }
}

fn display_name<'a>(staff: &'a [Staff], skip: &'a crate::scheduler::SkippedRequest) -> &'a str {
    staff
        .iter()
        .find(|s| s.id == skip.staff_id)
        .map(|s| s.name.as_str())
        .unwrap_or_else(|| skip.staff_id.as_str())
}
