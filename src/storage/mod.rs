//! Local persistence shared by the mood journal and anything else that needs to remember state
//! between runs.
//!  - Values are complete json documents stored under a string key.
//!  - Writes replace the whole value, there is no incremental update.
//!  - [key_value::FileStore] keeps every key in its own file inside the application directory.

pub mod key_value;
