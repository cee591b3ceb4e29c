pub const CONSOLE_STYLES: &str = r#"
/* Shell */
.console-shell {
    display: flex;
    flex-direction: column;
    min-height: 100vh;
    background: var(--console-bg, #f5f6fa);
    color: var(--text-primary, #1f2937);
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
    font-size: 14px;
}

.console-nav {
    display: flex;
    align-items: center;
    gap: 0.25rem;
    padding: 0 1.5rem;
    height: 52px;
    background: #1a1a2e;
    color: #fff;
    flex-shrink: 0;
}

.console-brand {
    font-weight: 700;
    margin-right: 1.5rem;
}

.nav-link {
    background: none;
    border: none;
    color: #cbd5e1;
    padding: 0.5rem 0.9rem;
    border-radius: 6px;
    cursor: pointer;
    font-size: 0.9rem;
}

.nav-link:hover {
    background: rgba(255, 255, 255, 0.08);
}

.nav-link.active {
    background: #4361ee;
    color: #fff;
}

.console-main {
    flex: 1;
    padding: 1.25rem 1.5rem;
}

.console-page {
    display: flex;
    flex-direction: column;
    gap: 1rem;
}

.page-header {
    display: flex;
    flex-wrap: wrap;
    align-items: center;
    justify-content: space-between;
    gap: 0.75rem;
}

.page-header h2 {
    margin: 0;
    font-size: 1.1rem;
}

/* Cards */
.card {
    background: #fff;
    border-radius: 8px;
    box-shadow: 0 1px 3px rgba(0, 0, 0, 0.08);
    padding: 1rem 1.25rem;
}

.card-title {
    font-weight: 600;
    margin-bottom: 0.75rem;
}

.card-header-row {
    display: flex;
    align-items: center;
    justify-content: space-between;
    gap: 1rem;
}

.loading,
.empty-state {
    padding: 2rem;
    text-align: center;
    color: #6b7280;
}

.empty-state.error {
    color: #dc3545;
}

/* Period picker */
.period-picker {
    display: flex;
    flex-wrap: wrap;
    align-items: center;
    gap: 0.4rem;
}

.period-btn,
.page-btn {
    border: 1px solid #d1d5db;
    background: #fff;
    border-radius: 6px;
    padding: 0.3rem 0.7rem;
    cursor: pointer;
}

.period-btn.active,
.page-btn.active {
    background: #4361ee;
    border-color: #4361ee;
    color: #fff;
}

.page-btn:disabled {
    opacity: 0.4;
    cursor: default;
}

.period-custom {
    display: flex;
    align-items: center;
    gap: 0.4rem;
    margin-left: 0.5rem;
}

.period-error,
.form-error {
    color: #dc3545;
    font-size: 0.8rem;
}

/* Search & forms */
.search-bar,
.form-row {
    display: flex;
    flex-wrap: wrap;
    align-items: center;
    gap: 0.5rem;
    margin-bottom: 0.75rem;
}

.search-input,
.form-input,
.filter-select {
    border: 1px solid #d1d5db;
    border-radius: 6px;
    padding: 0.4rem 0.6rem;
    min-width: 280px;
}

.filter-select {
    min-width: 0;
}

.detail-toggle {
    display: flex;
    align-items: center;
    gap: 4px;
    font-size: 13px;
}

.search-btn,
.btn {
    border: none;
    border-radius: 6px;
    padding: 0.4rem 0.9rem;
    cursor: pointer;
    background: #4361ee;
    color: #fff;
}

.btn-danger {
    background: #dc3545;
}

.btn-sm {
    padding: 0.2rem 0.6rem;
    font-size: 0.8rem;
}

/* Tables */
table {
    width: 100%;
    border-collapse: collapse;
}

th,
td {
    padding: 0.5rem 0.6rem;
    border-bottom: 1px solid #eef0f4;
    text-align: left;
    white-space: nowrap;
}

th.sortable {
    cursor: pointer;
    user-select: none;
}

th.sorted {
    color: #4361ee;
}

.table-wrap {
    overflow-x: auto;
}

.stats-table tbody tr,
.trace-row {
    cursor: pointer;
}

.stats-table tbody tr:hover,
.trace-row:hover {
    background: #f8f9fc;
}

.stats-table tr.selected {
    background: #eef1fd;
}

.path-cell {
    font-family: ui-monospace, monospace;
}

.pagination {
    display: flex;
    justify-content: center;
    gap: 0.3rem;
    margin-top: 0.75rem;
}

/* Severity */
.text-ok { color: #28a745; }
.text-warn { color: #b58900; }
.text-error { color: #dc3545; font-weight: 600; }

.badge {
    display: inline-block;
    border-radius: 10px;
    padding: 0.1rem 0.5rem;
    font-size: 0.75rem;
    font-weight: 600;
    color: #fff;
}

.badge-success { background: #28a745; }
.badge-warn { background: #ffc107; color: #1f2937; }
.badge-error { background: #dc3545; }

/* Percentile chart */
.chart-slot {
    margin-top: 1rem;
}

.stats-chart-title {
    font-weight: 600;
    margin-bottom: 0.5rem;
}

.stats-chart-svg {
    width: 100%;
    max-width: 640px;
    height: 260px;
}

/* Trace timeline */
.timeline {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
}

.timeline-hop {
    display: grid;
    grid-template-columns: 70px 1fr 70px;
    align-items: center;
    gap: 0.5rem;
    cursor: pointer;
    padding: 0.25rem 0;
}

.timeline-hop:hover {
    background: #f8f9fc;
}

.timeline-hop-label {
    font-size: 0.8rem;
    color: #4b5563;
}

.timeline-bar-container {
    position: relative;
    height: 22px;
    background: #f1f3f8;
    border-radius: 4px;
}

.timeline-bar {
    position: absolute;
    top: 0;
    height: 100%;
    border-radius: 4px;
    color: #fff;
    font-size: 0.7rem;
    line-height: 22px;
    padding-left: 4px;
    overflow: hidden;
    white-space: nowrap;
}

.status-2xx { background: #28a745; }
.status-4xx { background: #ffc107; color: #1f2937; }
.status-5xx { background: #dc3545; }

.hop-detail {
    margin: 0.25rem 0 0.75rem 70px;
    padding: 0.75rem 1rem;
    background: #f8f9fc;
    border-radius: 6px;
}

.hop-detail-row {
    display: flex;
    gap: 0.75rem;
    padding: 0.15rem 0;
}

.hop-detail-label {
    width: 90px;
    color: #6b7280;
    flex-shrink: 0;
}

.hop-payload {
    margin-top: 8px;
}

.hop-body {
    margin-top: 4px;
    padding: 0.5rem;
    background: #fff;
    border: 1px solid #e5e7eb;
    border-radius: 4px;
    font-family: ui-monospace, monospace;
    font-size: 0.75rem;
    white-space: pre-wrap;
    word-break: break-all;
    max-height: 320px;
    overflow: auto;
}

/* Traffic */
.summary-stats {
    display: flex;
    justify-content: space-around;
}

.summary-stat {
    text-align: center;
}

.summary-val {
    font-size: 1.4rem;
    font-weight: 700;
}

.summary-key {
    color: #6b7280;
    font-size: 0.8rem;
}

.traffic-layout {
    display: grid;
    grid-template-columns: 1fr 300px;
    gap: 1rem;
}

.traffic-legend {
    display: flex;
    gap: 0.75rem;
    font-size: 0.75rem;
}

.legend-item {
    display: flex;
    align-items: center;
    gap: 4px;
}

.legend-dot {
    width: 10px;
    height: 10px;
    border-radius: 50%;
    display: inline-block;
}

.traffic-hint {
    font-size: 0.75rem;
    color: #6b7280;
    margin-bottom: 0.5rem;
}

.cy-container {
    min-height: 200px;
    overflow: auto;
}

.traffic-graph {
    display: block;
}

.graph-node,
.graph-edge {
    cursor: pointer;
}

.graph-edge-label {
    paint-order: stroke;
    stroke: #fff;
    stroke-width: 3px;
}

.panel-row {
    display: flex;
    justify-content: space-between;
    padding: 0.35rem 0;
    border-bottom: 1px solid #eef0f4;
}

.panel-label {
    color: #6b7280;
}

.panel-placeholder {
    padding: 2rem 0;
    text-align: center;
    color: #9ca3af;
}

/* Policy toggle */
.toggle {
    position: relative;
    display: inline-block;
    width: 36px;
    height: 20px;
}

.toggle-input {
    opacity: 0;
    width: 0;
    height: 0;
}

.toggle-slider {
    position: absolute;
    inset: 0;
    background: #d1d5db;
    border-radius: 20px;
    cursor: pointer;
    transition: background 0.2s;
}

.toggle-slider::before {
    content: "";
    position: absolute;
    width: 14px;
    height: 14px;
    left: 3px;
    top: 3px;
    background: #fff;
    border-radius: 50%;
    transition: transform 0.2s;
}

.toggle-input:checked + .toggle-slider {
    background: #4361ee;
}

.toggle-input:checked + .toggle-slider::before {
    transform: translateX(16px);
}

@media (max-width: 900px) {
    .traffic-layout {
        grid-template-columns: 1fr;
    }
}
"#;
