use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use rand::seq::SliceRandom;
use std::iter;

use crate::date_range::format_date;
use crate::models::{
    AttendanceStatus, Grade, MistakeCount, MistakePortion, RecitationLog, RecitationType,
};

const SURAHS: [&str; 8] = [
    "Al-Baqarah",
    "Al-Imran",
    "An-Nisa",
    "Al-Maidah",
    "Al-An'am",
    "Al-A'raf",
    "Al-Anfal",
    "At-Tawbah",
];

const ABSENCE_REASONS: [&str; 5] = [
    "Sick",
    "Vacation",
    "Family Emergency",
    "Transport Issues",
    "Other",
];

pub const DEMO_TESTER: &str = "Demo Teacher";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceLevel {
    Strong,
    Steady,
    Struggling,
}

#[derive(Debug, Clone)]
pub struct DemoStudent {
    pub id: &'static str,
    pub name: &'static str,
    pub performance: PerformanceLevel,
    pub attendance_rate: f64,
}

pub fn demo_students() -> Vec<DemoStudent> {
    vec![
        DemoStudent {
            id: "demo-student-1",
            name: "Bilal Siddiqui",
            performance: PerformanceLevel::Strong,
            attendance_rate: 0.95,
        },
        DemoStudent {
            id: "demo-student-2",
            name: "Khadija Noor",
            performance: PerformanceLevel::Steady,
            attendance_rate: 0.85,
        },
        DemoStudent {
            id: "demo-student-3",
            name: "Hamza Qureshi",
            performance: PerformanceLevel::Struggling,
            attendance_rate: 0.75,
        },
        DemoStudent {
            id: "demo-student-4",
            name: "Safiya Malik",
            performance: PerformanceLevel::Strong,
            attendance_rate: 0.9,
        },
        DemoStudent {
            id: "demo-student-5",
            name: "Idris Farouk",
            performance: PerformanceLevel::Steady,
            attendance_rate: 0.88,
        },
    ]
}

/// Classes run Sunday to Thursday
pub fn is_school_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
}

/// The last `count` school days up to and including `today`, oldest first
pub fn school_days_until(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = iter::successors(Some(today), |date| date.pred_opt())
        .filter(|date| is_school_day(*date))
        .take(count)
        .collect();
    days.reverse();
    days
}

fn session_grade<R: Rng>(
    rng: &mut R,
    performance: PerformanceLevel,
    mistakes: u32,
    stucks: u32,
) -> Grade {
    let mut grade_index = match performance {
        PerformanceLevel::Strong => rng.gen_range(0..2),
        PerformanceLevel::Steady => rng.gen_range(1..4),
        PerformanceLevel::Struggling => rng.gen_range(2..5),
    };

    let issues = mistakes + stucks;
    if issues == 0 {
        grade_index = 0;
    } else if issues <= 2 {
        grade_index = grade_index.min(1);
    } else if issues > 8 {
        grade_index = 4;
    }
    Grade::ALL[grade_index]
}

fn session_log<R: Rng>(
    rng: &mut R,
    student: &DemoStudent,
    date: NaiveDate,
    index: usize,
    attendance: AttendanceStatus,
) -> RecitationLog {
    let recitation_type = *RecitationType::ALL
        .choose(rng)
        .unwrap_or(&RecitationType::Sabaq);

    let (mistakes, stucks) = match student.performance {
        PerformanceLevel::Strong => (rng.gen_range(0..2), 0),
        PerformanceLevel::Steady => (rng.gen_range(1..5), rng.gen_range(0..2)),
        PerformanceLevel::Struggling => (rng.gen_range(3..11), rng.gen_range(1..5)),
    };
    let needs_repeat = match student.performance {
        PerformanceLevel::Strong => false,
        PerformanceLevel::Steady => mistakes > 3,
        PerformanceLevel::Struggling => mistakes > 5,
    };
    let grade = session_grade(rng, student.performance, mistakes, stucks);
    let date_text = format_date(date);

    let mut log = RecitationLog {
        id: format!("demo-log-{}-{}-{}", student.id, date_text, index),
        user_id: student.id.to_string(),
        date: date_text.clone(),
        recitation_type: recitation_type.as_str().to_string(),
        mistake_counts: vec![MistakeCount::new(
            MistakePortion::Full,
            mistakes,
            stucks,
            rng.gen_range(0..2),
        )],
        tester_name: Some(DEMO_TESTER.to_string()),
        grade: Some(grade),
        needs_repeat: Some(needs_repeat),
        attendance_status: Some(attendance),
        absence_reason: (attendance == AttendanceStatus::Late)
            .then(|| "Transport Issues".to_string()),
        created_at: format!("{}T{:02}:00:00.000Z", date_text, 8 + index),
        ..Default::default()
    };

    if recitation_type.is_juz_based() {
        log.juz_number = Some(rng.gen_range(1..=30));
        log.pages_count = Some(rng.gen_range(1..=10));
    } else {
        let ayah_start = rng.gen_range(1..=10);
        log.surah_name = SURAHS.choose(rng).map(|surah| surah.to_string());
        log.ayah_start = Some(ayah_start);
        log.ayah_end = Some(ayah_start + rng.gen_range(5..20));
    }

    log
}

fn absence_log<R: Rng>(rng: &mut R, student: &DemoStudent, date: NaiveDate) -> RecitationLog {
    let date_text = format_date(date);
    RecitationLog {
        id: format!("demo-attendance-{}-{}", student.id, date_text),
        user_id: student.id.to_string(),
        date: date_text.clone(),
        recitation_type: RecitationType::Sabaq.as_str().to_string(),
        tester_name: Some(DEMO_TESTER.to_string()),
        attendance_status: Some(AttendanceStatus::Absent),
        absence_reason: ABSENCE_REASONS.choose(rng).map(|reason| reason.to_string()),
        created_at: format!("{}T08:00:00.000Z", date_text),
        ..Default::default()
    }
}

/// Generates a demo classroom history over the last `school_days` school days.
///
/// Present students get one to three graded sessions a day; absent students get a
/// single attendance-only record with no mistake counts. The result is owned by
/// the caller and sorted newest first.
pub fn generate_demo_logs<R: Rng>(
    rng: &mut R,
    students: &[DemoStudent],
    today: NaiveDate,
    school_days: usize,
) -> Vec<RecitationLog> {
    let mut logs = Vec::new();

    for date in school_days_until(today, school_days) {
        for student in students {
            if rng.gen_bool(student.attendance_rate.clamp(0.0, 1.0)) {
                let attendance = if rng.gen_bool(0.1) {
                    AttendanceStatus::Late
                } else {
                    AttendanceStatus::Present
                };
                for index in 0..rng.gen_range(1..=3) {
                    logs.push(session_log(rng, student, date, index, attendance));
                }
            } else {
                logs.push(absence_log(rng, student, date));
            }
        }
    }

    logs.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));
    logs
}
