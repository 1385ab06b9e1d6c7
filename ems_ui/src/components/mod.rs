mod chpsoc_modal;
mod chpsoc_widget;
mod live;
mod toast;

pub use chpsoc_widget::ChpsocWidget;
pub use live::LivePage;
pub use toast::ToastContainer;
