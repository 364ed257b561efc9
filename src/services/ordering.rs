use crate::domain::Service;
use std::collections::HashMap;

const SEPARATOR: char = '|';
const SIGN_BIT: u64 = 1 << 63;

/// Service ids ordered by weight, then id.
///
/// Each id gets a sort key made of its zero-padded weight and the id itself;
/// the keys are sorted lexically and the weight prefix is stripped again. The
/// weight is shifted into unsigned space first so negative weights keep their
/// numeric order. A missing weight counts as 0.
pub fn sort_services(services: &HashMap<String, Service>) -> Vec<String> {
    let mut keys: Vec<String> = services
        .iter()
        .map(|(id, service)| sort_key(service.weight().unwrap_or(0), id))
        .collect();
    keys.sort();

    keys.into_iter()
        .filter_map(|key| {
            key.split_once(SEPARATOR)
                .map(|(_, id)| id.to_string())
        })
        .collect()
}

fn sort_key(weight: i64, id: &str) -> String {
    let biased = (weight as u64) ^ SIGN_BIT;
    format!("{biased:020}{SEPARATOR}{id}")
}
