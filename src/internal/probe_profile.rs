#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::indexing_slicing)]

use plotters::prelude::*;
use probemap::{DEFAULT_LOAD_FACTOR_THRESHOLD, ProbingHashTable, TableError};
use rand::Rng;

// Large prime so every load factor is measured on the same slot array
const TABLE_SIZE: usize = 100_003;
// Load factors from 0.1 to 0.9
const NUM_LOAD_FACTORS: usize = 9;
// Keeps growth out of the way while the table is filled to 0.9
const PROFILE_THRESHOLD: f64 = 0.95;
// Absent keys probed per load factor
const MISSES: usize = 10_000;

struct Profile {
    load_factor: f64,
    avg_hit: f64,
    avg_miss: f64,
    worst: usize,
}

fn profile(keys: &[u64], misses: &[u64], load_factor: f64) -> Result<Profile, TableError> {
    let n_keys = (TABLE_SIZE as f64 * load_factor) as usize;
    let mut table = ProbingHashTable::with_capacity_and_threshold(TABLE_SIZE, PROFILE_THRESHOLD)?;

    for &key in keys.iter().take(n_keys) {
        table.insert(key, ())?;
    }

    let hits: Vec<usize> = table.iter().map(|(key, ())| table.probe_count(key)).collect();
    let miss_probes: Vec<usize> = misses.iter().map(|key| table.probe_count(key)).collect();

    let avg_hit = hits.iter().sum::<usize>() as f64 / hits.len().max(1) as f64;
    let avg_miss = miss_probes.iter().sum::<usize>() as f64 / miss_probes.len().max(1) as f64;
    let worst = hits.iter().chain(&miss_probes).copied().max().unwrap_or(0);

    Ok(Profile { load_factor: table.load_factor(), avg_hit, avg_miss, worst })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.9 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    // Even keys are inserted, odd keys are guaranteed misses
    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..TABLE_SIZE).map(|_| rng.random::<u64>() & !1).collect();
    let misses: Vec<u64> = (0..MISSES).map(|_| rng.random::<u64>() | 1).collect();

    let mut profiles = Vec::with_capacity(NUM_LOAD_FACTORS);
    for &load_factor in &load_factors {
        let result = profile(&keys, &misses, load_factor)?;
        println!(
            "Load factor {:.2}: avg hit probes = {:.2}, avg miss probes = {:.2}, worst = {}",
            result.load_factor, result.avg_hit, result.avg_miss, result.worst
        );
        profiles.push(result);
    }

    let font_family = "sans-serif";
    let colors = [
        RGBColor(50, 90, 220),  // Bright blue
        RGBColor(220, 50, 50),  // Bright red
        RGBColor(50, 180, 50),  // Bright green
    ];
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    let root = BitMapBackend::new("probe_lengths.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_probes = profiles.iter().map(|p| p.worst as f64).fold(1.0, f64::max) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Double Hashing Probe Lengths", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0.0..1.0, 0.0..max_probes)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc("Slots Inspected")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    // Growth threshold used by default tables
    let reference_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
    chart
        .draw_series(LineSeries::new(
            vec![
                (DEFAULT_LOAD_FACTOR_THRESHOLD, 0.0),
                (DEFAULT_LOAD_FACTOR_THRESHOLD, max_probes),
            ],
            reference_style,
        ))?
        .label("Default Growth Threshold")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));

    let series: [(&str, Vec<(f64, f64)>); 3] = [
        ("Successful Search (avg)", profiles.iter().map(|p| (p.load_factor, p.avg_hit)).collect()),
        (
            "Unsuccessful Search (avg)",
            profiles.iter().map(|p| (p.load_factor, p.avg_miss)).collect(),
        ),
        ("Worst Case", profiles.iter().map(|p| (p.load_factor, p.worst as f64)).collect()),
    ];

    for (series_idx, (label, points)) in series.iter().enumerate() {
        let color = &colors[series_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            points.iter().map(|&point| Circle::new(point, marker_size, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    println!("Generated plot image: probe_lengths.png");

    Ok(())
}
