use anyhow::Context;
use circulus_config::PlaygroundConfig;
use circulus_ring::RingBuffer;
use tracing_subscriber::EnvFilter;

fn dump(step: &str, ring: &RingBuffer<i64>) {
    tracing::info!(
        step,
        len = ring.len(),
        capacity = ring.capacity(),
        "contents: {ring:?}"
    );
    for (index, value) in ring.iter().enumerate() {
        tracing::debug!("[{index}]={value}");
    }
}

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => PlaygroundConfig::load(&path)
            .with_context(|| format!("loading playground config from {path}"))?,
        None => PlaygroundConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let mut ring = RingBuffer::<i64>::new(config.capacity)
        .with_context(|| format!("creating ring with capacity {}", config.capacity))?;

    ring.extend(0..config.fill as i64);
    dump("fill", &ring);

    for (index, value) in [(1, 42), (0, 43), (2, 44)] {
        match ring.insert(index, value) {
            Ok(()) => dump(&format!("insert({index}, {value})"), &ring),
            Err(err) => tracing::warn!(index, value, %err, "insert rejected"),
        }
    }

    let base = config.fill as i64;
    for value in base..base + ring.capacity() as i64 {
        let (evicted, prior) = ring.push_exchange(value);
        tracing::info!(value, evicted, prior, "push_exchange");
    }
    dump("exchange", &ring);

    if let Some(&front) = ring.front() {
        ring.remove(&front);
        dump(&format!("remove({front})"), &ring);
    }
    ring.push(-1);
    dump("push(-1)", &ring);

    let mut cursor = ring.cursor();
    if let Some(first) = cursor.next(&ring) {
        tracing::info!(first = ?first, "cursor started");
    }
    ring.clear();
    if let Some(Err(err)) = cursor.next(&ring) {
        tracing::info!(%err, "cursor invalidated by clear");
    }
    dump("clear", &ring);

    Ok(())
}
