use colored::{Color, Colorize};
use std::fmt::{self, Write};

use crate::analytics::{AnalyticsSnapshot, ContentKind};
use crate::models::Grade;

const RULE_WIDTH: usize = 60;

fn plural(count: impl Into<u64>, noun: &str) -> String {
    let count = count.into();
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::Excellent => Color::Green,
        Grade::VeryGood => Color::Blue,
        Grade::Good => Color::Yellow,
        Grade::Average => Color::BrightYellow,
        Grade::Failed => Color::Red,
    }
}

fn section(output: &mut String, title: &str) -> fmt::Result {
    writeln!(output)?;
    writeln!(output, "{}", title.bold())?;
    writeln!(output, "{}", "-".repeat(RULE_WIDTH))
}

/// Renders an analytics snapshot as a plain-text report.
/// Colouring follows the global `colored` override set by the caller.
pub fn render_report(
    snapshot: &AnalyticsSnapshot,
    student: Option<&str>,
) -> Result<String, fmt::Error> {
    let mut output = String::new();

    writeln!(output, "Hifz Progress Report")?;
    writeln!(output, "====================")?;
    writeln!(output, "Student: {}", student.unwrap_or("all students"))?;
    writeln!(output, "Today: {}", snapshot.today)?;
    writeln!(output, "Sessions: {}", snapshot.total_sessions)?;

    section(&mut output, "Streak")?;
    let streak = &snapshot.streak;
    writeln!(output, "  Current streak: {}", plural(streak.current_streak, "day"))?;
    writeln!(output, "  Longest streak: {}", plural(streak.longest_streak, "day"))?;
    match streak.last_log_date {
        Some(date) => writeln!(output, "  Last session: {}", date)?,
        None => writeln!(output, "  Last session: none yet")?,
    }

    section(&mut output, "Attendance")?;
    let attendance = &snapshot.attendance;
    writeln!(
        output,
        "  Present {}, Late {}, Absent {} (attendance {}%)",
        attendance.present, attendance.late, attendance.absent, attendance.attendance_rate
    )?;

    section(&mut output, "Grades")?;
    if snapshot.grade_distribution.is_empty() {
        writeln!(output, "  No graded sessions")?;
    }
    for entry in &snapshot.grade_distribution {
        let name = format!("{:<10}", entry.grade.as_str());
        writeln!(
            output,
            "  {} {} ({}%)",
            name.color(grade_color(entry.grade)),
            entry.count,
            entry.percentage
        )?;
    }

    section(
        &mut output,
        &format!("Daily Mistakes (last {})", plural(snapshot.mistake_trends.len() as u64, "day")),
    )?;
    for (trend, activity) in snapshot.mistake_trends.iter().zip(&snapshot.consistency) {
        writeln!(
            output,
            "  {}: {}, {} (avg {:.1}; mistakes {}, stucks {}, marked {})",
            trend.label(),
            plural(activity.count as u64, "session"),
            plural(trend.total_mistakes, "mistake"),
            trend.average_mistakes,
            trend.mistake_types.mistakes,
            trend.mistake_types.stucks,
            trend.mistake_types.marked
        )?;
    }

    section(&mut output, "Recitation Types")?;
    if snapshot.recitation_types.is_empty() {
        writeln!(output, "  No sessions recorded")?;
    }
    for stats in &snapshot.recitation_types {
        let last = stats
            .last_session
            .map(|date| date.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        writeln!(
            output,
            "  {}: {}, avg grade {:.1}, {}, last {}",
            stats.recitation_type.as_str(),
            plural(stats.total_sessions as u64, "session"),
            stats.average_grade,
            plural(stats.total_mistakes, "mistake"),
            last
        )?;
    }

    section(&mut output, "Content")?;
    if snapshot.content_performance.is_empty() {
        writeln!(output, "  No sessions with a surah or juz'")?;
    }
    for content in &snapshot.content_performance {
        let marker = if content.needs_improvement {
            "✗".red()
        } else {
            "✓".green()
        };
        let kind = match content.kind {
            ContentKind::Surah => "Surah",
            ContentKind::Juz => "Juz",
        };
        writeln!(
            output,
            "  {} {} {}: {}, avg grade {:.1}, avg mistakes {:.1}",
            marker,
            kind,
            content.content,
            plural(content.total_sessions as u64, "session"),
            content.average_grade,
            content.average_mistakes
        )?;
    }

    section(
        &mut output,
        &format!(
            "Weekly Progress (last {})",
            plural(snapshot.weekly_progress.len() as u64, "week")
        ),
    )?;
    for week in &snapshot.weekly_progress {
        writeln!(
            output,
            "  {}: {}, avg grade {:.1}, {}",
            week.week,
            plural(week.sessions_count as u64, "session"),
            week.average_grade,
            plural(week.total_mistakes, "mistake")
        )?;
    }

    Ok(output)
}
