// Rust guideline compliant 2026-10-16

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use modrel_core::{
    check_readiness, extract_linked_issues, FixtureHost, HostFixture, HostingApi, IssueFixture,
    RepositoryFixture, WebLinks,
};

fn build_body(references: usize) -> String {
    let mut body = String::from("This change reworks the backup flow.\n");
    for i in 0..references {
        match i % 3 {
            0 => body.push_str(&format!("Fixes NethServer/dev#{}\n", i + 1)),
            1 => body.push_str(&format!("See https://github.com/NethServer/dev/issues/{}\n", i + 1)),
            _ => body.push_str(&format!("Refs NethServer/issues/{}\n", i + 1)),
        }
    }
    body
}

fn build_host(commits: usize) -> FixtureHost {
    let epoch = Utc.timestamp_opt(1, 0).unwrap();
    let mut module = RepositoryFixture::new("main")
        .commits(["base"])
        .tag("1.0.0", "base")
        .release("1.0.0", false, epoch);
    let mut tracker = RepositoryFixture::new("main");

    for i in 0..commits {
        let sha = format!("c{}", i);
        let pr = (i / 2 + 1) as u64;
        let issue = (i / 4 + 1) as u64;
        module.commits.push(sha.clone());
        module = module.pulls(sha, &[pr]);
        if i % 2 == 0 {
            module = module.pull_request(pr, format!("Fixes NethServer/dev#{}", issue), &[]);
        }
        if i % 4 == 0 {
            let mut fixture = IssueFixture::new(issue, format!("Issue {}", issue)).label("verified");
            if issue > 1 {
                fixture = fixture.parent(1);
            }
            tracker.issues.push(fixture);
        }
    }

    FixtureHost::new(
        HostFixture::default()
            .with_repository("NethServer/ns8-bench", module)
            .with_repository("NethServer/dev", tracker),
    )
}

fn bench_extract_linked_issues(c: &mut Criterion) {
    let body = build_body(300);
    c.bench_function("extract_linked_issues_300", |b| {
        b.iter(|| black_box(extract_linked_issues(black_box(&body), "NethServer/dev")))
    });
}

fn bench_check_readiness(c: &mut Criterion) {
    let host = build_host(1000);
    let repo = host
        .repository("NethServer/ns8-bench")
        .expect("Failed to load benchmark repository");
    let links = WebLinks::default();
    c.bench_function("check_readiness_1000_commits", |b| {
        b.iter(|| black_box(check_readiness(&host, &repo, "NethServer/dev", &links)))
    });
}

criterion_group!(benches, bench_extract_linked_issues, bench_check_readiness);
criterion_main!(benches);
