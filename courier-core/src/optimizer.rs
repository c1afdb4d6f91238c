use thiserror::Error;

use crate::{RouteRequest, RouteRequestValidationError, RouteResult};

/// Errors returned by [`RouteOptimizer::optimize`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    /// The request failed boundary validation.
    #[error("invalid route request: {0}")]
    InvalidRequest(#[from] RouteRequestValidationError),
    /// The caller cancelled the operation before it completed.
    #[error("route optimisation was cancelled")]
    Cancelled,
}

/// Produce a visiting order for a depot and its stops.
///
/// Implementations validate the request before doing any work and must
/// return every input stop exactly once. Optimisers are `Send + Sync` so a
/// single instance can serve concurrent callers.
pub trait RouteOptimizer: Send + Sync {
    /// Sequence `request`, or explain why it could not be sequenced.
    fn optimize(&self, request: &RouteRequest) -> Result<RouteResult, OptimizeError>;
}

impl<T> RouteOptimizer for &T
where
    T: RouteOptimizer + ?Sized,
{
    fn optimize(&self, request: &RouteRequest) -> Result<RouteResult, OptimizeError> {
        (**self).optimize(request)
    }
}

impl<T> RouteOptimizer for Box<T>
where
    T: RouteOptimizer + ?Sized,
{
    fn optimize(&self, request: &RouteRequest) -> Result<RouteResult, OptimizeError> {
        (**self).optimize(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Depot, Point, PointError};
    use rstest::rstest;

    struct EmptyOptimizer;

    impl RouteOptimizer for EmptyOptimizer {
        fn optimize(&self, request: &RouteRequest) -> Result<RouteResult, OptimizeError> {
            request.validate()?;
            Ok(RouteResult {
                total_distance: 0.0,
                total_points: 2,
                route: vec![0, 0],
                ordered_deliveries: Vec::new(),
            })
        }
    }

    #[rstest]
    fn validation_errors_convert_into_invalid_request() {
        let request: RouteRequest = RouteRequest::new(
            Depot::new(Point::new(0.0, 0.0).expect("valid point")),
            Vec::new(),
        );
        let boxed: Box<dyn RouteOptimizer> = Box::new(EmptyOptimizer);

        let result = boxed.optimize(&request).expect("valid request");
        assert_eq!(result.total_points, 2);

        let err = OptimizeError::from(RouteRequestValidationError::InvalidDepot(
            PointError::LatitudeOutOfRange(100.0),
        ));
        assert_eq!(
            err.to_string(),
            "invalid route request: invalid depot: latitude 100 is outside [-90, 90]"
        );
    }
}
