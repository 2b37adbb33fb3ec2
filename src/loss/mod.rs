pub mod loss_fn;
pub mod mse;
pub mod mae;
pub mod huber;
pub mod bce;
pub mod cross_entropy;
pub mod loss_type;

pub use loss_fn::LossFunction;
pub use mse::MseLoss;
pub use mae::MaeLoss;
pub use huber::HuberLoss;
pub use bce::BceLoss;
pub use cross_entropy::CrossEntropyLoss;
pub use loss_type::LossType;
