//! Content repositories
//!
//! Each repository reads its source files on every call; nothing is cached
//! between calls, so repositories are cheap to clone and share across threads.

mod cv;
mod posts;
mod projects;

pub use cv::CvRepository;
pub use posts::PostRepository;
pub use projects::ProjectRepository;
