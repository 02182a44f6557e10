use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("the cluster handle is closed, no further cluster queries can be served")]
    ClusterClosed,
}
