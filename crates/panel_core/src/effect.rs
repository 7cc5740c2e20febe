use crate::DownloadFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Insert one button per format, in this order, at the front of the action container.
    InjectButtons { buttons: Vec<DownloadFormat> },
    /// Disconnect the page observer.
    StopObserving,
    Export { format: DownloadFormat },
    /// User-visible notice; the request that raised it is over.
    Alert { message: String },
}
