//! Benchmarks for visibility notification and full scrollspy updates.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sectionspy_core::config::{ObserverConfig, SpyConfig};
use sectionspy_core::geometry::Viewport;
use sectionspy_core::{ElementSpec, Page, PageSpec, Registry, ScrollSpy, Selectors, VisibilityObserver};

const SECTION_HEIGHT: i32 = 900;

/// A page with `count` stacked sections and a nav link for each.
fn generate_page(count: usize) -> Page {
    let nav = (0..count).fold(ElementSpec::new("nav"), |nav, i| {
        nav.child(ElementSpec::link("navigation__link", &format!("#s{i}")))
    });
    let mut elements = vec![nav];
    elements.extend((0..count).map(|i| ElementSpec::section(&format!("s{i}"), SECTION_HEIGHT)));
    Page::from_spec(&PageSpec {
        width: 1280,
        elements,
    })
    .unwrap()
}

fn bench_notify(c: &mut Criterion) {
    let mut group = c.benchmark_group("observer_notify");

    for count in [10, 100, 1000] {
        let page = generate_page(count);
        let registry = Registry::build(&page, &Selectors::default());
        let mut observer =
            VisibilityObserver::observe(registry.regions(), ObserverConfig::default(), |_| {});
        let max = page.content_height();
        let mut y = 0;

        group.bench_with_input(BenchmarkId::new("scroll_step", count), &count, |b, _| {
            b.iter(|| {
                y = (y + 97) % max;
                observer.notify(&page, Viewport::new(1280, 1000).at(y))
            });
        });
    }

    group.finish();
}

fn bench_spy(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrollspy_update");

    for count in [10, 100, 1000] {
        let page = generate_page(count);
        let mut spy = ScrollSpy::start(&page, &SpyConfig::default()).unwrap();
        let max = page.content_height();
        let mut y = 0;

        group.bench_with_input(BenchmarkId::new("scroll_step", count), &count, |b, _| {
            b.iter(|| {
                y = (y + 97) % max;
                spy.on_viewport_change(&page, Viewport::new(1280, 1000).at(y))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_notify, bench_spy);
criterion_main!(benches);
