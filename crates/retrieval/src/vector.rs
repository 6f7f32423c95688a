//! Vector similarity utilities.
//!
//! Pure-Rust cosine similarity and top-k ranking over document records.

use studyhall_core::document::{DocumentRecord, RetrievedDocument};

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal, -1 = opposite.
/// Returns 0.0 if either vector is zero-length or empty.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// Rank documents by cosine similarity to a query embedding.
///
/// Returns the `top_k` nearest documents as [`RetrievedDocument`]s sorted by
/// descending similarity. Records without an embedding are skipped.
pub fn rank_documents(
    records: &[DocumentRecord],
    query_embedding: &[f32],
    top_k: usize,
) -> Vec<RetrievedDocument> {
    let mut scored: Vec<(f32, &DocumentRecord)> = records
        .iter()
        .filter_map(|record| {
            let emb = record.embedding.as_ref()?;
            let sim = cosine_similarity(emb, query_embedding);
            Some((sim, record))
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);

    scored
        .into_iter()
        .map(|(score, record)| RetrievedDocument {
            id: record.id.clone(),
            source: record.source.clone(),
            text: record.text.clone(),
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, embedding: Option<Vec<f32>>) -> DocumentRecord {
        DocumentRecord::new(id, format!("Content for {id}"), format!("{id}.txt"), embedding)
    }

    #[test]
    fn cosine_identical_vectors() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn cosine_opposite_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn cosine_empty_vectors() {
        let sim = cosine_similarity(&[], &[]);
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn cosine_mismatched_lengths() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&a, &b);
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn cosine_zero_vector() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&a, &b);
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn cosine_known_value() {
        // [1,1] · [1,0] = 1, |[1,1]| = sqrt(2), |[1,0]| = 1
        // similarity = 1 / sqrt(2) ≈ 0.7071
        let a = vec![1.0, 1.0];
        let b = vec![1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim - 0.7071).abs() < 0.001);
    }

    #[test]
    fn ranking_orders_by_similarity() {
        let query = vec![1.0, 0.0, 0.0];
        let records = vec![
            record("a", Some(vec![0.0, 1.0, 0.0])), // orthogonal = 0
            record("b", Some(vec![1.0, 0.0, 0.0])), // identical = 1
            record("c", Some(vec![0.5, 0.5, 0.0])), // partial = ~0.707
        ];

        let results = rank_documents(&records, &query, 10);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].id, "b");
        assert_eq!(results[1].id, "c");
        assert_eq!(results[2].id, "a");
    }

    #[test]
    fn ranking_skips_no_embedding() {
        let query = vec![1.0, 0.0];
        let records = vec![
            record("a", Some(vec![1.0, 0.0])),
            record("b", None), // no embedding
        ];

        let results = rank_documents(&records, &query, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");
    }

    #[test]
    fn ranking_respects_top_k() {
        let query = vec![1.0, 0.0];
        let records: Vec<_> = (0..10)
            .map(|i| record(&format!("d{i}"), Some(vec![1.0, i as f32 * 0.1])))
            .collect();

        let results = rank_documents(&records, &query, 3);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn ranking_carries_source_labels() {
        let query = vec![1.0];
        let records = vec![record("syllabus", Some(vec![1.0]))];
        let results = rank_documents(&records, &query, 1);
        assert_eq!(results[0].source, "syllabus.txt");
    }
}
