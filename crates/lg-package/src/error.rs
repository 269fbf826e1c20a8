use lg_core::{PackageId, PointId, VehicleId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackageError {
    #[error("{0} has identical origin and destination {1}")]
    SameEndpoints(PackageId, PointId),

    #[error("{0} was already loaded")]
    AlreadyLoaded(PackageId),

    #[error("{0} was already delivered")]
    AlreadyDelivered(PackageId),

    #[error("{0} is not in any vehicle")]
    NotCarried(PackageId),

    #[error("{package} is carried by {carrier}, not {requested_by}")]
    WrongCarrier {
        package:      PackageId,
        carrier:      VehicleId,
        requested_by: VehicleId,
    },

    #[error("{package} is bound for {destination}, not {at}")]
    WrongDestination {
        package:     PackageId,
        destination: PointId,
        at:          PointId,
    },
}

pub type PackageResult<T> = Result<T, PackageError>;
