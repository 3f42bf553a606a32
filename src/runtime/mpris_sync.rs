use crate::mpris::MprisHandle;
use crate::player::Snapshot;

pub fn update_mpris(mpris: &MprisHandle, snap: &Snapshot<'_>) {
    mpris.set_now_playing(snap.current, snap.album, snap.song);
    mpris.set_playback(snap.playing);
}
