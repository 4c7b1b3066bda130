//! Where posts and their comments come from
//!
//! Fetching from the live site is somebody else's job. The pipeline pulls posts through
//! `PostSource`, one at a time, and treats every failure as a failure of that post only.
//!
//! `DirectorySource` reads dumps like this, one file per post:
//!
//! ```json
//! {"id": "abc12", "title": "Business casual?", "comments": [
//!     {"id": "c1", "body": "A black blazer.", "score": 12}
//! ]}
//! ```
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use crate::errors::*;

/// A post, identified but not yet read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    pub id: String,
}

/// One top-level comment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawComment {
    pub id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
}

/// Pull-based supplier of posts and their comments
pub trait PostSource {
    /// Every post to process, in a stable order
    fn posts(&mut self) -> Result<Vec<RawPost>>;
    /// Top-level comments of one post
    fn comments(&mut self, post: &RawPost) -> Result<Vec<RawComment>>;
}

#[derive(Debug, Deserialize)]
struct PostDump {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    comments: Vec<RawComment>,
}

/// A directory of `*.json` post dumps, visited in file name order
#[derive(Debug)]
pub struct DirectorySource {
    dir: PathBuf,
    paths: Vec<(RawPost, PathBuf)>,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        DirectorySource { dir: dir.as_ref().to_path_buf(), paths: vec![] }
    }

    fn read_dump(path: &Path) -> Result<PostDump> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl PostSource for DirectorySource {
    /// Post ids are the file stems; the id inside the file has to agree
    fn posts(&mut self) -> Result<Vec<RawPost>> {
        let listing = fs::read_dir(&self.dir)
            .map_err(|e| Error::MissingFile("post directory", Some(e)))?;
        let mut paths = vec![];
        for entry in listing {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                paths.push((RawPost { id: stem.to_string() }, path.clone()));
            }
        }
        paths.sort_by(|a, b| a.1.cmp(&b.1));
        info!("Found {} post dumps in {}", paths.len(), self.dir.display());
        self.paths = paths;
        Ok(self.paths.iter().map(|&(ref post, _)| post.clone()).collect())
    }

    fn comments(&mut self, post: &RawPost) -> Result<Vec<RawComment>> {
        let path = self.paths.iter()
            .find(|&&(ref known, _)| known == post)
            .map(|&(_, ref path)| path.clone())
            .ok_or_else(|| Error::Source {
                post_id: post.id.clone(),
                msg: "not listed in this directory".into(),
            })?;
        let dump = DirectorySource::read_dump(&path).map_err(|e| Error::Source {
            post_id: post.id.clone(),
            msg: format!("{}: {}", path.display(), e),
        })?;
        if dump.id != post.id {
            return Err(Error::Source {
                post_id: post.id.clone(),
                msg: format!("{} claims to be post {}", path.display(), dump.id),
            });
        }
        debug!("Post {} ({:?}) has {} comments", dump.id, dump.title, dump.comments.len());
        Ok(dump.comments)
    }
}

/// Posts already in memory, with room for posts that fail to load
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    posts: Vec<(RawPost, ::std::result::Result<Vec<RawComment>, String>)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post<S: Into<String>>(mut self, id: S, comments: Vec<RawComment>) -> Self {
        self.posts.push((RawPost { id: id.into() }, Ok(comments)));
        self
    }

    /// A post whose comments can't be fetched
    pub fn with_failure<S: Into<String>, M: Into<String>>(mut self, id: S, msg: M) -> Self {
        self.posts.push((RawPost { id: id.into() }, Err(msg.into())));
        self
    }
}

impl PostSource for MemorySource {
    fn posts(&mut self) -> Result<Vec<RawPost>> {
        Ok(self.posts.iter().map(|&(ref post, _)| post.clone()).collect())
    }

    fn comments(&mut self, post: &RawPost) -> Result<Vec<RawComment>> {
        match self.posts.iter().find(|&&(ref known, _)| known == post) {
            Some(&(_, Ok(ref comments))) => Ok(comments.clone()),
            Some(&(_, Err(ref msg))) => Err(Error::Source { post_id: post.id.clone(), msg: msg.clone() }),
            None => Err(Error::Source { post_id: post.id.clone(), msg: "unknown post".into() }),
        }
    }
}
