use crate::dashboard::state::DashboardState;
use contracts::admin::rules::{Rule, RuleId};
use leptos::prelude::*;
use thaw::*;

fn source_badge(rule: &Rule) -> AnyView {
    let label = rule.source.as_str().to_string();
    if rule.source.is_generated() {
        view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>{label}</Badge> }.into_any()
    } else {
        view! { <Badge appearance=BadgeAppearance::Tint>{label}</Badge> }.into_any()
    }
}

#[component]
pub fn RuleList(state: RwSignal<DashboardState>, on_toggle: Callback<RuleId>) -> impl IntoView {
    let title = move || state.with(|s| s.rules.title());

    view! {
        <div class="card">
            <h2>{title}</h2>

            {move || state.with(|s| s.action_error.clone()).map(|err| view! {
                <div style="padding: 12px; background: var(--color-error-50); border: 1px solid var(--color-error-100); border-radius: 8px; display: flex; align-items: center; gap: 8px; margin-bottom: 16px;">
                    <span style="color: var(--color-error); font-size: 18px;">"⚠"</span>
                    <span style="color: var(--color-error);">{err}</span>
                </div>
            })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell attr:style="width: 60px;">"id"</TableHeaderCell>
                        <TableHeaderCell attr:style="width: 100px;">"type"</TableHeaderCell>
                        <TableHeaderCell>"pattern"</TableHeaderCell>
                        <TableHeaderCell attr:style="width: 80px; text-align: center;">"enabled"</TableHeaderCell>
                        <TableHeaderCell attr:style="width: 130px;">"source"</TableHeaderCell>
                        <TableHeaderCell attr:style="width: 100px; text-align: center;">"actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let (rules, is_loaded) = state.with(|s| (s.rules.rules.clone(), s.rules.is_loaded));
                        if !is_loaded {
                            view! {
                                <TableRow>
                                    <TableCell attr:colspan="6" attr:style="padding: 40px; text-align: center;">
                                        <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small>
                                            <Spinner />
                                            "Loading..."
                                        </Flex>
                                    </TableCell>
                                </TableRow>
                            }.into_any()
                        } else if rules.is_empty() {
                            view! {
                                <TableRow>
                                    <TableCell attr:colspan="6" attr:style="padding: 40px; text-align: center; color: var(--colorNeutralForeground3);">
                                        "No rules"
                                    </TableCell>
                                </TableRow>
                            }.into_any()
                        } else {
                            rules.into_iter().map(|rule: Rule| {
                                let id = rule.id;
                                let label = rule.toggle_label();
                                let badge = source_badge(&rule);
                                let comment = rule.comment.clone().unwrap_or_default();

                                view! {
                                    <TableRow attr:title=comment>
                                        <TableCell>{rule.id.to_string()}</TableCell>
                                        <TableCell>{rule.rule_type}</TableCell>
                                        <TableCell>
                                            <code class="mono">{rule.pattern}</code>
                                        </TableCell>
                                        <TableCell>
                                            <div style="text-align: center;">
                                                {if rule.enabled { "✅" } else { "⛔" }}
                                            </div>
                                        </TableCell>
                                        <TableCell>{badge}</TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <div style="text-align: center;">
                                                    <Button
                                                        appearance=ButtonAppearance::Secondary
                                                        on_click=move |_| on_toggle.run(id)
                                                    >
                                                        {label}
                                                    </Button>
                                                </div>
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view().into_any()
                        }
                    }}
                </TableBody>
            </Table>
        </div>
    }
}
