use crate::model::{Role, ScheduleEntry, ShiftCode, ShiftRequest, Staff, Unavailability};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

/// Import du personnel depuis CSV : header `name,role[,target_hours]`
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Staff>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let role = rec.get(1).context("missing role")?.trim();
        if name.is_empty() || role.is_empty() {
            bail!("invalid staff row (empty)");
        }
        let role: Role = role
            .parse()
            .map_err(|e: String| anyhow::anyhow!("invalid role for {name}: {e}"))?;
        let mut person = Staff::new(name.to_string(), role);
        if let Some(hours) = rec.get(2) {
            let hours = hours.trim();
            if !hours.is_empty() {
                person.target_hours = hours
                    .parse()
                    .with_context(|| format!("invalid target_hours for {name}"))?;
            }
        }
        out.push(person);
    }
    Ok(out)
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date: {raw}"))
}

/// Import d'indisponibilités : header `staff_id,date` (date `AAAA-MM-JJ`)
pub fn import_unavailability_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Unavailability>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let staff_id = rec.get(0).context("missing staff_id")?.trim();
        if staff_id.is_empty() {
            bail!("invalid unavailability row (empty staff_id)");
        }
        let date = parse_date(rec.get(1).context("missing date")?)?;
        out.push(Unavailability {
            staff_id: crate::model::StaffId::new(staff_id),
            date,
        });
    }
    Ok(out)
}

/// Import de vœux : header `staff_id,date,shift`
pub fn import_requests_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ShiftRequest>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let staff_id = rec.get(0).context("missing staff_id")?.trim();
        if staff_id.is_empty() {
            bail!("invalid request row (empty staff_id)");
        }
        let date = parse_date(rec.get(1).context("missing date")?)?;
        let shift: ShiftCode = rec
            .get(2)
            .context("missing shift")?
            .trim()
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        out.push(ShiftRequest {
            staff_id: crate::model::StaffId::new(staff_id),
            date,
            shift,
        });
    }
    Ok(out)
}

/// Export CSV du planning : header `staff_id,staff_name,date,shift`
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    entries: &[ScheduleEntry],
    staff: &[Staff],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["staff_id", "staff_name", "date", "shift"])?;
    for e in entries {
        let name = staff
            .iter()
            .find(|s| s.id == e.staff_id)
            .map(|s| s.name.as_str())
            .unwrap_or("");
        let date = crate::calendar::day_key(e.date);
        w.write_record([e.staff_id.as_str(), name, date.as_str(), e.shift.code()])?;
    }
    w.flush()?;
    Ok(())
}
