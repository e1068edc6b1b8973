use crate::infra::{in_memory_service, InMemoryFacultyService};
use crate::seed::{seed_faculty, SeededFaculty};
use chrono::Local;
use clap::Args;
use fses::config::AppConfig;
use fses::error::AppError;
use fses::workflows::nomination::{
    ExaminerDraft, ExaminerSlot, NominationRequest, OverviewFilter, OverviewPage, StudentId,
    WorkloadEntry, WorkloadReport,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Print the roster as CSV instead of the dashboard summary
    #[arg(long)]
    pub(crate) csv: bool,
}

fn seeded_service() -> Result<(Arc<InMemoryFacultyService>, SeededFaculty), AppError> {
    let config = AppConfig::load()?;
    let service = in_memory_service(config.eligibility);
    let seeded = seed_faculty(&service)?;
    Ok((service, seeded))
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let (service, _) = seeded_service()?;
    let filter = OverviewFilter::default();

    if args.csv {
        print!("{}", service.roster_csv(&filter)?);
        return Ok(());
    }

    let today = Local::now().date_naive();
    println!("First stage evaluation report ({today})");
    render_overview(&service.overview(&filter)?);
    render_workload(&service.workload()?);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let (service, seeded) = seeded_service()?;
    let Some(&student) = seeded.students.get(1) else {
        println!("Seed data has no student to nominate");
        return Ok(());
    };
    let profile = service.get_student(student)?;

    println!("Nomination walkthrough for {}", profile.name);
    print_status(&service, student)?;

    println!("\nSupervisor nominates examiners");
    let mut draft = ExaminerDraft::default();
    for slot in ExaminerSlot::ordered() {
        let candidates = service.eligible_examiners(student, slot, Some(draft))?;
        let names: Vec<&str> = candidates.iter().map(|l| l.name.as_str()).collect();
        println!(
            "- Examiner {} candidates ({}): {}",
            slot.number(),
            candidates.len(),
            names.join(", ")
        );
        let Some(choice) = candidates.first() else {
            println!("  No eligible lecturer for this slot; stopping");
            return Ok(());
        };
        println!("  Selected {} ({})", choice.name, choice.title.label());
        match slot {
            ExaminerSlot::First => draft.examiner1 = Some(choice.id),
            ExaminerSlot::Second => draft.examiner2 = Some(choice.id),
            ExaminerSlot::Third => draft.examiner3 = Some(choice.id),
        }
    }

    let nomination = service.save_nomination(
        student,
        NominationRequest {
            research_title: Some("Adaptive test generation for microservices".to_string()),
            examiners: draft,
        },
    )?;
    println!(
        "- Saved nomination {} \"{}\"",
        nomination.id,
        nomination.research_title.as_deref().unwrap_or_default()
    );
    print_status(&service, student)?;

    println!("\nCoordinator assigns a chairperson");
    let chairs = service.eligible_chairpersons(student)?;
    let names: Vec<&str> = chairs.iter().map(|l| l.name.as_str()).collect();
    println!("- Chairperson candidates ({}): {}", chairs.len(), names.join(", "));
    let Some(chair) = chairs.first() else {
        println!("  No eligible chairperson; stopping");
        return Ok(());
    };
    service.assign_chairperson(student, Some(chair.id))?;
    println!("  Assigned {}", chair.name);
    service.set_lock(student, true)?;
    println!("  Nomination locked");
    print_status(&service, student)?;

    println!("\nSupervisor edits after lock");
    match service.save_nomination(
        student,
        NominationRequest {
            research_title: Some("Revised title".to_string()),
            examiners: draft,
        },
    ) {
        Ok(_) => println!("- Edit accepted unexpectedly"),
        Err(err) => println!("- Edit rejected: {err}"),
    }

    if let Some(lecturer) = seeded.lecturer(0) {
        let workload = service.workload()?;
        println!(
            "\n{} now examines {} and chairs {} session(s)",
            service.get_lecturer(lecturer)?.name,
            workload.examiner_sessions(lecturer),
            workload.chairperson_sessions(lecturer)
        );
    }

    Ok(())
}

fn print_status(service: &InMemoryFacultyService, student: StudentId) -> Result<(), AppError> {
    let view = service.status(student)?;
    println!(
        "- Status: {}{}",
        view.status_label,
        if view.is_locked { " (locked)" } else { "" }
    );
    Ok(())
}

fn render_overview(page: &OverviewPage) {
    println!("\nStatus summary ({} students)", page.tally.total);
    for (status, count) in &page.tally.by_status {
        println!("- {}: {}", status.label(), count);
    }
    for (program, count) in &page.tally.by_program {
        println!("- {program}: {count}");
    }

    println!("\nStudents");
    for row in &page.rows {
        let panel: Vec<&str> = [&row.examiner1, &row.examiner2, &row.examiner3]
            .into_iter()
            .filter_map(|name| name.as_deref())
            .collect();
        println!(
            "- {} [{}, {}] -> {}{}",
            row.name,
            row.program_label,
            row.department_name,
            row.status_label,
            if row.is_locked { " (locked)" } else { "" }
        );
        if let Some(title) = &row.research_title {
            println!("  Research: {title}");
        }
        if !panel.is_empty() {
            println!("  Examiners: {}", panel.join(", "));
        }
        if let Some(chair) = &row.chairperson {
            println!("  Chairperson: {chair}");
        }
    }
}

fn render_workload(report: &WorkloadReport) {
    let render = |heading: &str, entries: &[WorkloadEntry]| {
        println!("\n{heading}");
        if entries.is_empty() {
            println!("- none assigned");
        }
        for entry in entries {
            println!("- {}: {} session(s)", entry.name, entry.sessions);
        }
    };
    render("Examiner workload", &report.examiner_counts);
    render("Chairperson workload", &report.chairperson_counts);
    println!(
        "\n{} examiners | {} chairpersons | {:.2} sessions per examiner",
        report.total_examiners, report.total_chairpersons, report.average_sessions_per_examiner
    );
}
