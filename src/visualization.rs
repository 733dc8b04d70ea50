use crate::process::Process;
use crate::simulation::{PolicyRun, SimulationReport};
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Write one Gantt chart per run plus a policy comparison chart into `output_dir`
pub fn generate_plots(
    report: &SimulationReport,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(report.runs.len() + 1);
    for run in &report.runs {
        let path = output_dir.join(format!("gantt_{}.png", run.policy.name()));
        plot_gantt(run, &report.processes, &path)?;
        written.push(path);
    }

    if report.runs.len() > 1 {
        let path = output_dir.join("comparison.png");
        plot_comparison(&report.runs, &path)?;
        written.push(path);
    }

    Ok(written)
}

/// Plot a run's timeline with one row per process, in input order
pub fn plot_gantt(
    run: &PolicyRun,
    processes: &[Process],
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1024, 120 + 60 * processes.len().max(1) as u32))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let rows = processes.len().max(1) as f64;
    let makespan = (run.timeline.makespan() as f64).max(1.0);
    let ids: Vec<&str> = processes.iter().map(|p| p.id.as_str()).collect();
    let row_label = |y: &f64| {
        let row = y.round();
        if (y - row).abs() < 1e-6 && row >= 0.0 {
            ids.get(row as usize).map(|id| id.to_string()).unwrap_or_default()
        } else {
            String::new()
        }
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} Schedule", run.policy.display_name()),
            ("sans-serif", 32),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..makespan, -0.5..rows - 0.5)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Time (ticks)")
        .y_labels(processes.len().max(1))
        .y_label_formatter(&row_label)
        .draw()?;

    chart.draw_series(run.timeline.iter().filter_map(|interval| {
        let row = ids.iter().position(|id| *id == interval.process_id)?;
        let y = row as f64;
        Some(Rectangle::new(
            [
                (interval.start_time as f64, y - 0.35),
                (interval.end_time as f64, y + 0.35),
            ],
            Palette99::pick(row).filled(),
        ))
    }))?;

    root.present()?;
    Ok(())
}

/// Bar chart of mean waiting and turnaround time per policy
fn plot_comparison(runs: &[PolicyRun], path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_value = runs
        .iter()
        .map(|r| r.summary.avg_turnaround_time.max(r.summary.avg_waiting_time))
        .fold(1.0, f64::max);
    let names: Vec<&str> = runs.iter().map(|r| r.policy.name()).collect();
    let policy_label = |x: &f64| {
        let slot = x.round();
        if (x - slot).abs() < 1e-6 && slot >= 0.0 {
            names.get(slot as usize).map(|n| n.to_uppercase()).unwrap_or_default()
        } else {
            String::new()
        }
    };

    let mut chart = ChartBuilder::on(&root)
        .caption("Policy Comparison", ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..runs.len() as f64 - 0.5, 0.0..max_value * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(runs.len())
        .x_label_formatter(&policy_label)
        .y_desc("Ticks")
        .draw()?;

    chart
        .draw_series(runs.iter().enumerate().map(|(slot, run)| {
            let x = slot as f64;
            Rectangle::new(
                [(x - 0.35, 0.0), (x, run.summary.avg_waiting_time)],
                BLUE.filled(),
            )
        }))?
        .label("Avg waiting")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], BLUE.filled()));

    chart
        .draw_series(runs.iter().enumerate().map(|(slot, run)| {
            let x = slot as f64;
            Rectangle::new(
                [(x, 0.0), (x + 0.35, run.summary.avg_turnaround_time)],
                RED.filled(),
            )
        }))?
        .label("Avg turnaround")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], RED.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
