use rand::distributions::{Distribution, Uniform};
use rand::seq::SliceRandom;

/// Generate a vector of values from a uniform distribution, duplicates allowed
/// # Arguments
/// `size` Size of the vector to generate
pub fn gen_uniform_vec(size: i32) -> Vec<i64> {
    let mut rng = rand::thread_rng();
    let uniform = Uniform::from(0..1001i64);
    (0..size).map(|_| uniform.sample(&mut rng)).collect()
}

/// Generate the values 0, 1, .., (size - 1) in shuffled order, for
/// distinct-key workloads
/// # Arguments
/// `size` Size of the vector to generate
pub fn gen_shuffled_range(size: i64) -> Vec<i64> {
    let mut values: Vec<i64> = (0..size).collect();
    values.shuffle(&mut rand::thread_rng());
    values
}

/// Generate a vector of ascending values 0, 1, .., (size - 1), the worst
/// case for naive BST insertion
/// # Arguments
/// `size` Size of the vector to generate
pub fn gen_asc_vec(size: i64) -> Vec<i64> {
    (0..size).collect()
}
