use super::release::ReleaseAsset;
use crate::utils::platform::Platform;

/// Pick the asset built for `platform`: the first one named `*-{os}-{arch}`.
///
/// Well-formed releases carry at most one match. `None` means the release has
/// no build for this platform and no update should happen.
#[must_use]
pub fn select_asset<'a>(assets: &'a [ReleaseAsset], platform: &Platform) -> Option<&'a ReleaseAsset> {
    let suffix = platform.asset_suffix();
    assets.iter().find(|asset| asset.name.ends_with(&suffix))
}
