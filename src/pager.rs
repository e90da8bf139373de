//! The pager: maps page numbers to in-memory page buffers backed by a file.
//!
//! Pager errors are fatal. There is no recovery path once the on-disk
//! layout is suspect, so every failure here is reported through
//! `PagerError`'s `Display` and terminates the process rather than
//! bubbling a `Result` through every node accessor.
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, Write};
use std::process::exit;

use log::debug;

use crate::errors::PagerError;
use crate::node::Node;

pub const PAGE_SIZE: usize = 4096;
pub const MAX_PAGES: usize = 100;

fn die(err: impl std::fmt::Display) -> ! {
    println!("{err}");
    exit(1);
}

pub struct Pager {
    file: File,
    file_length: u64,
    pub num_pages: u32,
    pages: Vec<Option<Node>>,
}

impl Pager {
    pub fn open(filename: &str) -> Self {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(filename)
            .unwrap_or_else(|e| die(PagerError::Io(e)));

        let metadata = file
            .metadata()
            .unwrap_or_else(|e| die(PagerError::Io(e)));

        let file_length = metadata.len();
        if file_length % PAGE_SIZE as u64 != 0 {
            die(PagerError::CorruptFileLength);
        }
        let num_pages = (file_length / PAGE_SIZE as u64) as u32;

        let mut pages = Vec::with_capacity(MAX_PAGES);
        pages.resize_with(MAX_PAGES, || None);

        Self {
            file,
            file_length,
            num_pages,
            pages,
        }
    }

    fn validate_page_num(page_num: u32) {
        if page_num as usize >= MAX_PAGES {
            die(PagerError::PageOutOfBounds {
                page_num,
                max_pages: MAX_PAGES as u32,
            });
        }
    }

    /// Returns the resident buffer for `page_num`, reading it from disk on
    /// first access or allocating a fresh zeroed leaf if it is new.
    pub fn get_page(&mut self, page_num: u32) -> &mut Node {
        Self::validate_page_num(page_num);

        if self.pages[page_num as usize].is_none() {
            let mut num_pages_on_disk = self.file_length / PAGE_SIZE as u64;
            if self.file_length % PAGE_SIZE as u64 != 0 {
                // Tolerate a partial trailing page by padding with zeros.
                num_pages_on_disk += 1;
            }

            let node = if (page_num as u64) < num_pages_on_disk {
                let offset = page_num as u64 * PAGE_SIZE as u64;
                self.file
                    .seek(std::io::SeekFrom::Start(offset))
                    .unwrap_or_else(|e| die(PagerError::Io(e)));

                let mut buffer = [0u8; PAGE_SIZE];
                self.file
                    .read(&mut buffer)
                    .unwrap_or_else(|e| die(PagerError::Io(e)));

                Node::from_bytes(&buffer)
            } else {
                debug!("allocating new page {page_num}");
                Node::initialize_leaf_node()
            };

            self.pages[page_num as usize] = Some(node);

            if page_num >= self.num_pages {
                self.num_pages = page_num + 1;
            }
        }

        self.pages[page_num as usize].as_mut().unwrap()
    }

    /// Writes the resident page at `page_num` back to its on-disk offset.
    pub fn flush(&mut self, page_num: u32) {
        Self::validate_page_num(page_num);

        let Some(page) = self.pages[page_num as usize].as_ref() else {
            return;
        };

        let offset = page_num as u64 * PAGE_SIZE as u64;
        self.file
            .seek(std::io::SeekFrom::Start(offset))
            .unwrap_or_else(|e| die(PagerError::Io(e)));

        self.file
            .write_all(&page.to_bytes())
            .unwrap_or_else(|e| die(PagerError::Io(e)));
    }

    /// No free list: new pages always land at the end of the file.
    pub fn get_unused_page_num(&self) -> u32 {
        self.num_pages
    }
}
