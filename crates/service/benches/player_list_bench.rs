use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::pagination::Pagination;
use service::player::domain::{Profession, Race};
use service::player::repository::mock::InMemoryPlayerRepository;
use service::player::{PlayerFilter, PlayerInput, PlayerOrder, PlayerService};

const RACES: [Race; 4] = [Race::Human, Race::Elf, Race::Dwarf, Race::Orc];

fn bench_list(c: &mut Criterion) {
    let svc = PlayerService::new(Arc::new(InMemoryPlayerRepository::default()));

    // seed outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        for i in 0..2_000i64 {
            let input = PlayerInput {
                name: Some(format!("p{i}")),
                title: Some(format!("title {}", i % 17)),
                race: Some(RACES[(i % 4) as usize]),
                profession: Some(Profession::Warrior),
                birthday: Some(946_684_800_000 + i * 86_400_000),
                experience: Some((i * 4_999) as i32),
                banned: Some(i % 5 == 0),
            };
            svc.create(input).await.unwrap();
        }
    });

    let filter = PlayerFilter {
        title: Some("TITLE 1".into()),
        race: Some(Race::Elf),
        banned: Some(false),
        min_level: Some(3),
        ..Default::default()
    };

    c.bench_function("player_list_filter_sort_page", |b| {
        b.iter(|| {
            let _ = rt
                .block_on(svc.list(&filter, PlayerOrder::Experience, Pagination { page: 1, per_page: 20 }))
                .unwrap();
        });
    });

    c.bench_function("player_count_filter", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.count(&filter)).unwrap();
        });
    });
}

criterion_group!(benches, bench_list);
criterion_main!(benches);
