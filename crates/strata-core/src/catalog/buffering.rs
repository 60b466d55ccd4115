//! Buffering layers: resilience and data durability.

use crate::primitives::{KAFKA_BUFFER, MEMORY_QUEUE, PERSISTENT_QUEUE};
use crate::{Layer, LayerType, NodeKind, SnippetKind};

pub(super) fn layers() -> Vec<Layer> {
    vec![memory_queue(), persistent_queue(), kafka_buffer()]
}

fn memory_queue() -> Layer {
    Layer::new(MEMORY_QUEUE, LayerType::Buffering, "In-Memory Queues")
        .describe(
            "Default sending queues with retry. Data lost on collector crash. \
             Suitable when some loss is acceptable.",
            "Cpu",
        )
        .providing(&["basic-retry", "backpressure"])
        .snippet(SnippetKind::Agent, MEMORY_QUEUE_CONFIG)
}

fn persistent_queue() -> Layer {
    Layer::new(PERSISTENT_QUEUE, LayerType::Buffering, "Persistent Queues")
        .describe(
            "File-based WAL survives collector crashes. Requires PVC in Kubernetes. \
             Good balance of resilience and simplicity.",
            "HardDrive",
        )
        .providing(&["crash-recovery", "restart-resilience"])
        .snippet(SnippetKind::Agent, PERSISTENT_QUEUE_CONFIG)
        .snippet(SnippetKind::Deployment, PERSISTENT_QUEUE_MANIFEST)
}

/// The only buffering layer with a diagram node; it sits between edge and processing.
fn kafka_buffer() -> Layer {
    Layer::new(KAFKA_BUFFER, LayerType::Buffering, "Kafka Buffer")
        .describe(
            "External Kafka cluster for maximum durability. Survives hours of backend outages. \
             Enables replay and multi-consumer.",
            "Database",
        )
        .requiring(&["kafka-cluster"])
        .providing(&[
            "extended-outage-survival",
            "replay",
            "multi-consumer",
            "decoupling",
        ])
        .node("kafka", NodeKind::Kafka, "Kafka")
        .snippet(SnippetKind::Agent, KAFKA_EXPORTER_CONFIG)
        .snippet(SnippetKind::Gateway, KAFKA_RECEIVER_CONFIG)
        .snippet(SnippetKind::Deployment, KAFKA_TOPIC_NOTES)
}

// =============================================================================
// CONFIG SNIPPETS
// =============================================================================

const MEMORY_QUEUE_CONFIG: &str = r#"# In-memory queue configuration (default)
exporters:
  otlp:
    endpoint: backend:4317
    sending_queue:
      enabled: true
      num_consumers: 10
      queue_size: 1000
    retry_on_failure:
      enabled: true
      initial_interval: 5s
      max_interval: 30s
      max_elapsed_time: 300s"#;

const PERSISTENT_QUEUE_CONFIG: &str = r#"# Persistent queue configuration
extensions:
  file_storage:
    directory: /var/lib/otelcol/file_storage

exporters:
  otlp:
    endpoint: backend:4317
    sending_queue:
      enabled: true
      storage: file_storage
      queue_size: 10000
    retry_on_failure:
      enabled: true
      max_elapsed_time: 3600s  # Retry for up to 1 hour

service:
  extensions: [file_storage]"#;

const PERSISTENT_QUEUE_MANIFEST: &str = r#"# StatefulSet with PVC for persistent queue
apiVersion: apps/v1
kind: StatefulSet
metadata:
  name: otel-collector
spec:
  serviceName: otel-collector
  replicas: 3
  template:
    spec:
      containers:
        - name: collector
          volumeMounts:
            - name: queue-storage
              mountPath: /var/lib/otelcol/file_storage
  volumeClaimTemplates:
    - metadata:
        name: queue-storage
      spec:
        accessModes: ["ReadWriteOnce"]
        resources:
          requests:
            storage: 10Gi"#;

const KAFKA_EXPORTER_CONFIG: &str = r#"# Kafka exporter configuration (agent side)
exporters:
  kafka/traces:
    protocol_version: 3.5.0
    brokers:
      - kafka-0.kafka.svc:9092
      - kafka-1.kafka.svc:9092
      - kafka-2.kafka.svc:9092
    topic: otel-traces
    encoding: otlp_proto
    partition_traces_by_id: true  # For tail sampling compatibility
    producer:
      required_acks: -1  # Wait for all replicas
      compression: zstd
  kafka/metrics:
    protocol_version: 3.5.0
    brokers:
      - kafka-0.kafka.svc:9092
    topic: otel-metrics
    encoding: otlp_proto
  kafka/logs:
    protocol_version: 3.5.0
    brokers:
      - kafka-0.kafka.svc:9092
    topic: otel-logs
    encoding: otlp_proto"#;

const KAFKA_RECEIVER_CONFIG: &str = r#"# Kafka receiver configuration (gateway side)
receivers:
  kafka/traces:
    protocol_version: 3.5.0
    brokers:
      - kafka-0.kafka.svc:9092
    topic: otel-traces
    encoding: otlp_proto
    group_id: otel-gateway-traces
    initial_offset: earliest
  kafka/metrics:
    protocol_version: 3.5.0
    brokers:
      - kafka-0.kafka.svc:9092
    topic: otel-metrics
    encoding: otlp_proto
    group_id: otel-gateway-metrics
  kafka/logs:
    protocol_version: 3.5.0
    brokers:
      - kafka-0.kafka.svc:9092
    topic: otel-logs
    encoding: otlp_proto
    group_id: otel-gateway-logs

service:
  pipelines:
    traces:
      receivers: [kafka/traces]
      processors: [batch]
      exporters: [otlp/backend]"#;

const KAFKA_TOPIC_NOTES: &str = r#"# Note: Kafka cluster deployment is separate
# Ensure Kafka topics are created with appropriate partitions
# Partitions should >= number of consumer (gateway) replicas

# Example topic creation:
# kafka-topics.sh --create --topic otel-traces \
#   --partitions 12 --replication-factor 3 \
#   --bootstrap-server kafka:9092"#;
