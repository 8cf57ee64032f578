// Criterion benchmarks for Donor Match

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use donor_match::core::{compatibility::is_compatible, Matcher};
use donor_match::models::{BloodType, DonorRecord, OrganType, SearchQuery};

const CITIES: &[&str] = &["San Francisco", "Oakland", "San Jose", "Berkeley", "Palo Alto"];

fn create_donor(id: usize) -> DonorRecord {
    let today = Utc::now();
    DonorRecord {
        id: id.to_string(),
        name: format!("Donor {}", id),
        age: 18 + (id % 50) as u8,
        blood_type: BloodType::ALL[id % BloodType::ALL.len()],
        organs: if id % 4 == 0 { vec![OrganType::Kidney] } else { vec![] },
        last_donation: if id % 3 == 0 { Some(today - Duration::days((id % 120) as i64)) } else { None },
        city: CITIES[id % CITIES.len()].to_string(),
        state: "CA".to_string(),
        available: id % 7 != 0,
        distance_km: Some((id % 400) as f64 * 0.1),
    }
}

fn bench_compatibility(c: &mut Criterion) {
    c.bench_function("is_compatible", |b| {
        b.iter(|| is_compatible(black_box(BloodType::ONegative), black_box(BloodType::AbNegative)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::default();
    let query = SearchQuery::in_location("san")
        .with_blood_type(BloodType::APositive)
        .within_km(25.0);
    let today = Utc::now();

    let mut group = c.benchmark_group("matching");

    for donor_count in [10, 100, 1000, 10000].iter() {
        let donors: Vec<DonorRecord> = (0..*donor_count).map(create_donor).collect();

        group.bench_with_input(
            BenchmarkId::new("find_matches", donor_count),
            donor_count,
            |b, _| {
                b.iter(|| matcher.find_matches(black_box(&donors), black_box(&query), today).len());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compatibility, bench_matching);

criterion_main!(benches);
