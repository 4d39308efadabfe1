use chrono::NaiveDate;
use hifz_tracker::database::Database;
use hifz_tracker::date_provider::OverrideDateProvider;
use hifz_tracker::demo_data::{demo_students, generate_demo_logs};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;

#[test]
fn test_demo_logs_survive_a_store_round_trip() {
    let db = Database::new(":memory:").unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 1, 11).unwrap();
    let logs = generate_demo_logs(&mut StdRng::seed_from_u64(9), &demo_students(), today, 5);

    let imported = db.import_logs(&logs).unwrap();
    assert_eq!(imported, logs.len());
    assert_eq!(db.count_logs().unwrap(), logs.len() as i64);

    let mut stored = db.all_logs().unwrap();
    let mut expected = logs.clone();
    stored.sort_by(|a, b| a.id.cmp(&b.id));
    expected.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(stored, expected);
}

#[test]
fn test_file_store_persists_between_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("class.db");
    let path = path.to_str().unwrap();

    let export = r#"[
        {"id": "a", "userId": "s1", "date": "2024-01-10", "recitationType": "Sabaq",
         "surahName": "Al-Kahf", "mistakeCounts": [
            {"portion": "Quarter", "mistakes": 1, "stucks": 0, "markedMistakes": 0},
            {"portion": "Quarter", "mistakes": 0, "stucks": 1, "markedMistakes": 0},
            {"portion": "Quarter", "mistakes": 0, "stucks": 0, "markedMistakes": 1},
            {"portion": "Quarter", "mistakes": 2, "stucks": 0, "markedMistakes": 0}
         ], "grade": "Good", "createdAt": "2024-01-10T08:00:00.000Z"}
    ]"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(export.as_bytes()).unwrap();

    {
        let db = Database::new(path).unwrap();
        assert_eq!(db.import_logs_from_file(file.path()).unwrap(), 1);
    }

    let db = Database::new(path).unwrap();
    let provider = OverrideDateProvider::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    let snapshot = db
        .with_analytics(Some("s1"), &provider, |analytics| analytics.snapshot(7, 4))
        .unwrap();

    assert_eq!(snapshot.total_sessions, 1);
    assert_eq!(snapshot.streak.current_streak, 1);
    assert_eq!(snapshot.mistake_trends.last().unwrap().total_mistakes, 5);
    assert_eq!(snapshot.content_performance[0].content, "Al-Kahf");
    assert_eq!(snapshot.content_performance[0].average_grade, 3.0);
}
