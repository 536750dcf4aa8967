/// Cosine similarity of two embeddings.
///
/// Zero when either vector is empty, the lengths differ, either norm is zero,
/// or the result is not finite (components large enough to overflow `f32`).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (x, y)| {
        (dot + x * y, na + x * x, nb + y * y)
    });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !similarity.is_finite() {
        return 0.0;
    }
    similarity.clamp(-1.0, 1.0)
}
