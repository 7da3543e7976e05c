//! Independent hide and unveil jobs in parallel.
//!
//! Every job owns its carrier, payload and key material, results come back
//! in the order the jobs were given.

use std::path::PathBuf;

use rayon::prelude::*;

use super::hide::HideApi;
use super::unveil::UnveilApi;
use crate::result::Result;

pub fn hide_all(jobs: Vec<HideApi>) -> Vec<Result<PathBuf>> {
    log::debug!("hiding in {} carriers", jobs.len());
    jobs.into_par_iter().map(HideApi::execute).collect()
}

pub fn unveil_all(jobs: Vec<UnveilApi>) -> Vec<Result<Vec<PathBuf>>> {
    log::debug!("unveiling from {} carriers", jobs.len());
    jobs.into_par_iter().map(UnveilApi::execute).collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::{ImageBuffer, Rgba, RgbaImage};
    use tempfile::tempdir;

    use super::*;
    use crate::api::{hide, unveil};
    use crate::InvisioError;

    #[test]
    fn should_run_jobs_independently_and_keep_their_order() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let dir = temp_dir.path();
        let img: RgbaImage = ImageBuffer::from_fn(48, 48, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        img.save(dir.join("carrier.png")).unwrap();

        let jobs = (0..4)
            .map(|i| {
                hide::prepare()
                    .with_message(&format!("message {i}"))
                    .with_image(dir.join("carrier.png"))
                    .with_output(dir.join(format!("secret-{i}.png")))
            })
            .chain(std::iter::once(
                hide::prepare()
                    .with_message("too late")
                    .with_image(dir.join("missing.png"))
                    .with_output(dir.join("never.png")),
            ))
            .collect();

        let hidden = hide_all(jobs);
        assert_eq!(hidden.len(), 5);
        assert!(hidden[..4].iter().all(|r| r.is_ok()));
        assert!(hidden[4].is_err());

        let jobs = (0..4)
            .map(|i| {
                let out = dir.join(format!("out-{i}"));
                fs::create_dir(&out).unwrap();
                unveil::prepare()
                    .from_secret_file(dir.join(format!("secret-{i}.png")))
                    .into_output_folder(out)
            })
            .chain(std::iter::once(
                unveil::prepare()
                    .from_secret_file(dir.join("carrier.png"))
                    .into_output_folder(dir),
            ))
            .collect();

        let unveiled = unveil_all(jobs);
        for (i, result) in unveiled[..4].iter().enumerate() {
            let files = result.as_ref().unwrap();
            assert_eq!(fs::read_to_string(&files[0]).unwrap(), format!("message {i}"));
        }
        assert!(matches!(unveiled[4], Err(InvisioError::NoHiddenData)));
    }
}
