use crate::datastructures::ResultRow;

/// Rows from `(algorithm, gap, time)` triples, instances numbered per algorithm.
pub fn rows(runs: &[(&str, f64, f64)]) -> Vec<ResultRow> {
    let mut seen: Vec<&str> = vec![];
    runs.iter()
        .map(|&(algorithm, gap, time)| {
            seen.push(algorithm);
            let run = seen.iter().filter(|&&a| a == algorithm).count();
            ResultRow::new(format!("instance{run}"), algorithm, gap, time)
        })
        .collect()
}
