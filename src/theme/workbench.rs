//! Workbench (editor chrome) colors
//!
//! Every key is always emitted. `Variant::Bordered` only swaps the value of
//! the border keys from the background to a visible line color.

use serde_json::{Map, Value};

use super::Variant;
use crate::palette::{Color, Palette};

pub(super) fn colors(p: &Palette, variant: Variant) -> Map<String, Value> {
    let bg = p.background();
    let fg = p.foreground();
    let muted = p[8];
    let accent = p[4];
    let accent_bright = p[12];

    let surface = bg.mix(fg, 0.04);
    let raised = bg.mix(fg, 0.08);
    let line = bg.mix(fg, 0.18);
    let shadow = Color::rgb(0, 0, 0).with_alpha(0.3);

    let border = (if variant.is_bordered() { line } else { bg }).to_hex();
    let alpha = |c: Color, a: f32| c.with_alpha(a).to_hexa();

    let entries: Vec<(&str, String)> = vec![
        // Base
        ("foreground", fg.to_hex()),
        ("descriptionForeground", alpha(fg, 0.7)),
        ("disabledForeground", muted.to_hex()),
        ("errorForeground", p[1].to_hex()),
        ("focusBorder", alpha(accent, 0.6)),
        ("selection.background", alpha(accent, 0.3)),
        ("widget.shadow", shadow.to_hexa()),
        ("textLink.foreground", accent.to_hex()),
        ("textLink.activeForeground", accent_bright.to_hex()),
        // Buttons, badges, inputs
        ("button.background", accent.to_hex()),
        ("button.foreground", bg.to_hex()),
        ("button.hoverBackground", accent.lighten(0.15).to_hex()),
        ("badge.background", accent.to_hex()),
        ("badge.foreground", bg.to_hex()),
        ("input.background", surface.to_hex()),
        ("input.foreground", fg.to_hex()),
        ("input.border", border.clone()),
        ("input.placeholderForeground", muted.to_hex()),
        ("inputOption.activeBorder", accent.to_hex()),
        ("dropdown.background", surface.to_hex()),
        ("dropdown.foreground", fg.to_hex()),
        ("dropdown.border", border.clone()),
        ("progressBar.background", accent.to_hex()),
        ("scrollbarSlider.background", alpha(muted, 0.3)),
        ("scrollbarSlider.hoverBackground", alpha(muted, 0.5)),
        ("scrollbarSlider.activeBackground", alpha(muted, 0.7)),
        // Lists and trees
        ("list.activeSelectionBackground", alpha(accent, 0.25)),
        ("list.activeSelectionForeground", fg.to_hex()),
        ("list.inactiveSelectionBackground", raised.to_hex()),
        ("list.hoverBackground", surface.to_hex()),
        ("list.focusBackground", raised.to_hex()),
        ("list.highlightForeground", accent.to_hex()),
        ("list.errorForeground", p[1].to_hex()),
        ("list.warningForeground", p[3].to_hex()),
        // Activity bar
        ("activityBar.background", bg.to_hex()),
        ("activityBar.foreground", fg.to_hex()),
        ("activityBar.inactiveForeground", muted.to_hex()),
        ("activityBar.activeBorder", accent.to_hex()),
        ("activityBar.border", border.clone()),
        ("activityBarBadge.background", accent.to_hex()),
        ("activityBarBadge.foreground", bg.to_hex()),
        // Side bar
        ("sideBar.background", bg.to_hex()),
        ("sideBar.foreground", fg.to_hex()),
        ("sideBar.border", border.clone()),
        ("sideBarTitle.foreground", fg.to_hex()),
        ("sideBarSectionHeader.background", bg.to_hex()),
        ("sideBarSectionHeader.foreground", fg.to_hex()),
        ("sideBarSectionHeader.border", border.clone()),
        // Editor groups and tabs
        ("editorGroup.border", border.clone()),
        ("editorGroupHeader.tabsBackground", bg.to_hex()),
        ("editorGroupHeader.tabsBorder", border.clone()),
        ("editorGroupHeader.noTabsBackground", bg.to_hex()),
        ("tab.activeBackground", surface.to_hex()),
        ("tab.activeForeground", fg.to_hex()),
        ("tab.activeBorderTop", accent.to_hex()),
        ("tab.inactiveBackground", bg.to_hex()),
        ("tab.inactiveForeground", muted.to_hex()),
        ("tab.hoverBackground", surface.to_hex()),
        ("tab.unfocusedActiveForeground", alpha(fg, 0.7)),
        ("tab.border", border.clone()),
        // Editor
        ("editor.background", bg.to_hex()),
        ("editor.foreground", fg.to_hex()),
        ("editorCursor.foreground", fg.to_hex()),
        ("editorLineNumber.foreground", muted.to_hex()),
        ("editorLineNumber.activeForeground", fg.to_hex()),
        ("editor.lineHighlightBackground", surface.to_hex()),
        ("editor.lineHighlightBorder", surface.to_hex()),
        ("editor.selectionBackground", alpha(accent, 0.3)),
        ("editor.selectionHighlightBackground", alpha(accent, 0.15)),
        ("editor.inactiveSelectionBackground", alpha(accent, 0.15)),
        ("editor.wordHighlightBackground", alpha(p[6], 0.15)),
        ("editor.wordHighlightStrongBackground", alpha(p[6], 0.25)),
        ("editor.findMatchBackground", alpha(p[3], 0.4)),
        ("editor.findMatchHighlightBackground", alpha(p[3], 0.2)),
        ("editorIndentGuide.background1", raised.to_hex()),
        ("editorIndentGuide.activeBackground1", muted.to_hex()),
        ("editorWhitespace.foreground", raised.to_hex()),
        ("editorRuler.foreground", raised.to_hex()),
        ("editorBracketMatch.background", alpha(accent, 0.2)),
        ("editorBracketMatch.border", accent.to_hex()),
        ("editorError.foreground", p[1].to_hex()),
        ("editorWarning.foreground", p[3].to_hex()),
        ("editorInfo.foreground", p[4].to_hex()),
        ("editorHint.foreground", p[6].to_hex()),
        ("editorGutter.background", bg.to_hex()),
        ("editorGutter.addedBackground", p[2].to_hex()),
        ("editorGutter.modifiedBackground", p[4].to_hex()),
        ("editorGutter.deletedBackground", p[1].to_hex()),
        ("minimap.background", bg.to_hex()),
        // Widgets and peek view
        ("editorWidget.background", surface.to_hex()),
        ("editorWidget.border", border.clone()),
        ("editorSuggestWidget.background", surface.to_hex()),
        ("editorSuggestWidget.border", border.clone()),
        ("editorSuggestWidget.selectedBackground", raised.to_hex()),
        ("editorHoverWidget.background", surface.to_hex()),
        ("editorHoverWidget.border", border.clone()),
        ("peekView.border", accent.to_hex()),
        ("peekViewEditor.background", surface.to_hex()),
        ("peekViewResult.background", bg.to_hex()),
        ("peekViewTitle.background", bg.to_hex()),
        ("diffEditor.insertedTextBackground", alpha(p[2], 0.15)),
        ("diffEditor.removedTextBackground", alpha(p[1], 0.15)),
        // Panel
        ("panel.background", bg.to_hex()),
        ("panel.border", border.clone()),
        ("panelTitle.activeBorder", accent.to_hex()),
        ("panelTitle.activeForeground", fg.to_hex()),
        ("panelTitle.inactiveForeground", muted.to_hex()),
        // Status bar
        ("statusBar.background", bg.to_hex()),
        ("statusBar.foreground", fg.to_hex()),
        ("statusBar.border", border.clone()),
        ("statusBar.noFolderBackground", bg.to_hex()),
        ("statusBar.debuggingBackground", p[1].darken(0.2).to_hex()),
        ("statusBar.debuggingForeground", bg.to_hex()),
        ("statusBarItem.hoverBackground", raised.to_hex()),
        ("statusBarItem.remoteBackground", accent.to_hex()),
        ("statusBarItem.remoteForeground", bg.to_hex()),
        // Title bar and menus
        ("titleBar.activeBackground", bg.to_hex()),
        ("titleBar.activeForeground", fg.to_hex()),
        ("titleBar.inactiveBackground", bg.to_hex()),
        ("titleBar.inactiveForeground", muted.to_hex()),
        ("titleBar.border", border.clone()),
        ("menu.background", surface.to_hex()),
        ("menu.foreground", fg.to_hex()),
        ("menu.selectionBackground", raised.to_hex()),
        ("menu.border", border.clone()),
        // Notifications and quick input
        ("notifications.background", surface.to_hex()),
        ("notifications.foreground", fg.to_hex()),
        ("notifications.border", border.clone()),
        ("notificationCenter.border", border.clone()),
        ("notificationToast.border", border.clone()),
        ("quickInput.background", surface.to_hex()),
        ("quickInput.foreground", fg.to_hex()),
        ("pickerGroup.foreground", accent.to_hex()),
        ("pickerGroup.border", border),
        ("breadcrumb.foreground", muted.to_hex()),
        ("breadcrumb.focusForeground", fg.to_hex()),
        ("breadcrumb.activeSelectionForeground", fg.to_hex()),
        ("breadcrumbPicker.background", surface.to_hex()),
        // Source control decorations
        ("gitDecoration.addedResourceForeground", p[2].to_hex()),
        ("gitDecoration.modifiedResourceForeground", p[3].to_hex()),
        ("gitDecoration.deletedResourceForeground", p[1].to_hex()),
        ("gitDecoration.untrackedResourceForeground", p[10].to_hex()),
        ("gitDecoration.ignoredResourceForeground", muted.to_hex()),
        ("gitDecoration.conflictingResourceForeground", p[5].to_hex()),
        // Integrated terminal
        ("terminal.background", bg.to_hex()),
        ("terminal.foreground", fg.to_hex()),
        ("terminalCursor.foreground", fg.to_hex()),
        ("terminal.selectionBackground", alpha(accent, 0.3)),
    ];

    let mut colors: Map<String, Value> = entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value)))
        .collect();

    for (name, color) in ANSI_NAMES.iter().zip(p.colors()) {
        colors.insert(format!("terminal.ansi{name}"), Value::String(color.to_hex()));
    }

    colors
}

const ANSI_NAMES: [&str; 16] = [
    "Black",
    "Red",
    "Green",
    "Yellow",
    "Blue",
    "Magenta",
    "Cyan",
    "White",
    "BrightBlack",
    "BrightRed",
    "BrightGreen",
    "BrightYellow",
    "BrightBlue",
    "BrightMagenta",
    "BrightCyan",
    "BrightWhite",
];
