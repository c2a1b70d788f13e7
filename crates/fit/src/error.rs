//! Error types for the slr-fit crate.

/// Error type for all fallible operations in the slr-fit crate.
///
/// Covers invalid designs, numerical failure of the least-squares solve,
/// non-convergence of the AR(1) refinement and invalid inference requests.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// The regressor matrix does not have full column rank.
    #[error("design matrix is singular: rank {rank} < {n_params} parameters")]
    SingularMatrix {
        /// Numerical rank of the solved system.
        rank: usize,
        /// Number of columns of the design matrix.
        n_params: usize,
    },

    /// Too few complete rows for the number of parameters.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of rows in the design.
        n: usize,
        /// Minimum number of rows for the estimator.
        min: usize,
    },

    /// The design or response contains NaN or infinity.
    #[error("design or response contains non-finite values")]
    NonFiniteData,

    /// The AR(1) refinement did not settle and convergence was required.
    #[error("AR(1) refinement did not converge after {iterations} iterations (last change {last_change:.3e})")]
    NonConvergence {
        /// Number of refinement iterations performed.
        iterations: usize,
        /// Absolute change of rho in the last iteration.
        last_change: f64,
    },

    /// A prediction matrix has the wrong number of columns.
    #[error("dimension mismatch: expected {expected} columns, got {got}")]
    DimensionMismatch {
        /// Number of fitted parameters.
        expected: usize,
        /// Number of columns supplied.
        got: usize,
    },

    /// A significance level outside (0, 1).
    #[error("alpha must lie in (0, 1), got {alpha}")]
    InvalidAlpha {
        /// The rejected level.
        alpha: f64,
    },

    /// Estimator options failed validation.
    #[error("invalid options: {reason}")]
    InvalidOptions {
        /// Description of the violated constraint.
        reason: String,
    },

    /// A term was requested that the fitted model does not contain.
    #[error("term '{term}' is not part of the model")]
    MissingTerm {
        /// Label of the missing term.
        term: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_singular_matrix() {
        let err = FitError::SingularMatrix {
            rank: 3,
            n_params: 4,
        };
        assert_eq!(
            err.to_string(),
            "design matrix is singular: rank 3 < 4 parameters"
        );
    }

    #[test]
    fn error_insufficient_data() {
        let err = FitError::InsufficientData { n: 3, min: 5 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 3 observations, need at least 5"
        );
    }

    #[test]
    fn error_non_convergence() {
        let err = FitError::NonConvergence {
            iterations: 50,
            last_change: 0.0125,
        };
        assert_eq!(
            err.to_string(),
            "AR(1) refinement did not converge after 50 iterations (last change 1.250e-2)"
        );
    }

    #[test]
    fn error_missing_term() {
        let err = FitError::MissingTerm {
            term: "Wind u²".to_string(),
        };
        assert_eq!(err.to_string(), "term 'Wind u²' is not part of the model");
    }

    #[test]
    fn error_invalid_alpha() {
        let err = FitError::InvalidAlpha { alpha: 1.5 };
        assert_eq!(err.to_string(), "alpha must lie in (0, 1), got 1.5");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<FitError>();
    }
}
