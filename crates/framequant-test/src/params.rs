//! Regression test parameters and operations

use framequant_core::Frame;

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "octree")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "octree")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Record a boolean condition that must hold.
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.record_failure(msg);
        }
        condition
    }

    /// Compare two frames for exact equality
    ///
    /// # Returns
    ///
    /// `true` if frames are identical, `false` otherwise.
    pub fn compare_frames(&mut self, frame1: &Frame, frame2: &Frame) -> bool {
        self.index += 1;

        if frame1.width() != frame2.width() || frame1.height() != frame2.height() {
            let msg = format!(
                "Failure in {}_reg: frame comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            self.record_failure(msg);
            return false;
        }

        for y in 0..frame1.height() {
            for x in 0..frame1.width() {
                if frame1.get_pixel_unchecked(x, y) != frame2.get_pixel_unchecked(x, y) {
                    let msg = format!(
                        "Failure in {}_reg: frame comparison for index {} - pixel mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    );
                    self.record_failure(msg);
                    return false;
                }
            }
        }

        true
    }

    /// Compare two palette index arrays
    ///
    /// # Returns
    ///
    /// `true` if the arrays are identical, `false` otherwise.
    pub fn compare_indices(&mut self, indices1: &[u8], indices2: &[u8]) -> bool {
        self.index += 1;

        if indices1 != indices2 {
            let first_diff = indices1
                .iter()
                .zip(indices2)
                .position(|(a, b)| a != b)
                .unwrap_or(indices1.len().min(indices2.len()));
            let msg = format!(
                "Failure in {}_reg: index comparison for index {}\n\
                 sizes: {} vs {}, first difference at {}",
                self.test_name,
                self.index,
                indices1.len(),
                indices2.len(),
                first_diff
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framequant_core::Rgb;

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_frames() {
        let mut rp = RegParams::new("test");
        let a = Frame::new(2, 2).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_frames(&a, &b));
        b.set_pixel(1, 1, Rgb::WHITE).unwrap();
        assert!(!rp.compare_frames(&a, &b));
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_indices() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_indices(&[1, 2, 3], &[1, 2, 3]));
        assert!(!rp.compare_indices(&[1, 2, 3], &[1, 2]));
        assert!(!rp.check(false, "always fails"));
        assert!(!rp.cleanup());
    }
}
